// crates/ek-esi/src/error.rs

use crate::types::PdoDirection;
use quick_xml::errors::serialize::DeError;
use std::fmt;
use std::io;

/// Errors that can occur while loading ESI documents, resolving terminals,
/// sizing mappings or reading the terminal registry.
#[derive(Debug)]
pub enum EsiError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// A document or registry file could not be read.
    Io(io::Error),

    /// The registry could not be parsed, or a record could not be serialized.
    Json(serde_json::Error),

    /// An error occurred during string formatting (e.g., in the report renderer).
    FmtError(fmt::Error),

    /// A terminal name pattern is not a valid regular expression.
    InvalidPattern(regex::Error),

    /// No terminal name pattern was supplied.
    NoPatterns,

    /// A required XML element was missing (e.g., `Index` inside an `Entry`).
    MissingElement { element: &'static str },

    /// An element expected at most once appeared several times.
    AmbiguousElement { element: &'static str, count: usize },

    /// A numeric element was neither decimal nor `#x`-prefixed hex.
    InvalidNumber { element: &'static str, value: String },

    /// A mapping references a PDO index the device does not declare.
    UnknownIndex { index: u16, direction: PdoDirection },

    /// Several PDOs of the same direction share one index.
    DuplicateIndex {
        index: u16,
        direction: PdoDirection,
        count: usize,
    },

    /// The words selected by a mapping add up to more than `u32::MAX`.
    SizeOverflow { direction: PdoDirection },

    /// An error raised while processing a named document.
    Document { name: String, source: Box<EsiError> },
}

impl EsiError {
    /// Attaches the document name to an error raised while processing it.
    pub(crate) fn in_document(self, name: &str) -> Self {
        match self {
            EsiError::Document { .. } => self,
            other => EsiError::Document {
                name: name.to_owned(),
                source: Box::new(other),
            },
        }
    }
}

impl From<DeError> for EsiError {
    fn from(e: DeError) -> Self {
        EsiError::XmlParsing(e)
    }
}

impl From<io::Error> for EsiError {
    fn from(e: io::Error) -> Self {
        EsiError::Io(e)
    }
}

impl From<serde_json::Error> for EsiError {
    fn from(e: serde_json::Error) -> Self {
        EsiError::Json(e)
    }
}

impl From<fmt::Error> for EsiError {
    fn from(e: fmt::Error) -> Self {
        EsiError::FmtError(e)
    }
}

impl From<regex::Error> for EsiError {
    fn from(e: regex::Error) -> Self {
        EsiError::InvalidPattern(e)
    }
}

impl fmt::Display for EsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsiError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            EsiError::Io(e) => write!(f, "I/O error: {}", e),
            EsiError::Json(e) => write!(f, "JSON error: {}", e),
            EsiError::FmtError(e) => write!(f, "Formatting error: {}", e),
            EsiError::InvalidPattern(e) => write!(f, "Invalid terminal name pattern: {}", e),
            EsiError::NoPatterns => write!(f, "No terminal name pattern given"),
            EsiError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            EsiError::AmbiguousElement { element, count } => write!(
                f,
                "Expected at most one <{}> element but found {}",
                element, count
            ),
            EsiError::InvalidNumber { element, value } => {
                write!(f, "Invalid number in <{}>: {:?}", element, value)
            }
            EsiError::UnknownIndex { index, direction } => {
                write!(f, "Unknown index 0x{:04X} in {}", index, direction)
            }
            EsiError::DuplicateIndex {
                index,
                direction,
                count,
            } => write!(
                f,
                "Index 0x{:04X} is declared by {} {} entries",
                index, count, direction
            ),
            EsiError::SizeOverflow { direction } => {
                write!(f, "Total {} size does not fit in 32 bits", direction)
            }
            EsiError::Document { name, source } => write!(f, "{}: {}", name, source),
        }
    }
}

impl std::error::Error for EsiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EsiError::XmlParsing(e) => Some(e),
            EsiError::Io(e) => Some(e),
            EsiError::Json(e) => Some(e),
            EsiError::FmtError(e) => Some(e),
            EsiError::InvalidPattern(e) => Some(e),
            EsiError::Document { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
