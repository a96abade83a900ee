// crates/ek-esi/src/search.rs

//! Scans a [`DocumentRepository`] for terminals whose type name matches a pattern.

use crate::error::EsiError;
use crate::parser::{EsiDocument, load_esi_from_str};
use crate::repository::DocumentRepository;
use crate::types::TerminalInfo;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::iter::FusedIterator;
use std::vec;

/// One or more regular expressions, combined as alternatives.
///
/// Matching is case-insensitive and anchored at the start of the type name
/// only, so `EL30..` matches `EL3064` as well as `EL3064-0010`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, EsiError> {
        if patterns.is_empty() {
            return Err(EsiError::NoPatterns);
        }
        let alternatives: Vec<String> = patterns
            .iter()
            .map(|p| format!("(?:{})", p.as_ref()))
            .collect();
        let regex = RegexBuilder::new(&format!("^(?:{})", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    pub fn matches(&self, type_name: &str) -> bool {
        self.regex.is_match(type_name)
    }
}

/// Lazily yields the matching terminals of a repository.
///
/// Documents are read one at a time in repository order and devices are
/// visited in document order. The first error ends the search.
pub struct TerminalSearch<'r, R: DocumentRepository + ?Sized> {
    repository: &'r R,
    pattern: NamePattern,
    handles: Option<vec::IntoIter<String>>,
    current: Option<(String, EsiDocument, usize)>,
    finished: bool,
}

/// Starts a search of `repository` for devices whose `<Type>` matches `pattern`.
pub fn find_matching<R: DocumentRepository + ?Sized>(
    repository: &R,
    pattern: NamePattern,
) -> TerminalSearch<'_, R> {
    TerminalSearch {
        repository,
        pattern,
        handles: None,
        current: None,
        finished: false,
    }
}

impl<R: DocumentRepository + ?Sized> TerminalSearch<'_, R> {
    /// Next matching device of the current document, if any.
    fn next_in_current(&mut self) -> Option<Result<TerminalInfo, EsiError>> {
        let (handle, document, position) = self.current.as_mut()?;
        while let Some(device) = document.device(*position) {
            *position += 1;
            let type_name = match device.type_name() {
                Ok(name) => name,
                Err(e) => return Some(Err(e.in_document(handle))),
            };
            if self.pattern.matches(type_name) {
                debug!("{}: {} matches", handle, type_name);
                return Some(device.resolve().map_err(|e| e.in_document(handle)));
            }
        }
        self.current = None;
        None
    }

    /// Loads the next document. `Ok(false)` once the repository is exhausted.
    fn advance_document(&mut self) -> Result<bool, EsiError> {
        if self.handles.is_none() {
            self.handles = Some(self.repository.handles()?.into_iter());
        }
        let Some(handle) = self.handles.as_mut().and_then(|h| h.next()) else {
            return Ok(false);
        };

        debug!("Scanning {}", handle);
        let document = self
            .repository
            .read(&handle)
            .and_then(|xml| load_esi_from_str(&xml))
            .map_err(|e| e.in_document(&handle))?;
        self.current = Some((handle, document, 0));
        Ok(true)
    }
}

impl<R: DocumentRepository + ?Sized> Iterator for TerminalSearch<'_, R> {
    type Item = Result<TerminalInfo, EsiError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if let Some(result) = self.next_in_current() {
                if result.is_err() {
                    self.finished = true;
                }
                return Some(result);
            }
            match self.advance_document() {
                Ok(true) => {}
                Ok(false) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<R: DocumentRepository + ?Sized> FusedIterator for TerminalSearch<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_case_insensitive_prefix() {
        let pattern = NamePattern::new(&["EL30.."]).unwrap();
        assert!(pattern.matches("el3064"));
        assert!(pattern.matches("EL3064-0010"));
        assert!(!pattern.matches("EL4001"));
        assert!(!pattern.matches("XEL3064"));
    }

    #[test]
    fn test_patterns_are_alternatives() {
        let pattern = NamePattern::new(&["EL1008", "EL2.0[24]"]).unwrap();
        assert!(pattern.matches("EL1008"));
        assert!(pattern.matches("EL2004"));
        assert!(pattern.matches("el2802"));
        assert!(!pattern.matches("EL2008"));
    }

    #[test]
    fn test_pattern_errors() {
        let none: [&str; 0] = [];
        assert!(matches!(NamePattern::new(&none), Err(EsiError::NoPatterns)));
        assert!(matches!(
            NamePattern::new(&["EL50[4"]),
            Err(EsiError::InvalidPattern(_))
        ));
    }
}
