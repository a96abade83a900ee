// crates/ek-esi/src/repository.rs

//! Sources of ESI documents for the terminal search.

use crate::error::EsiError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A collection of ESI documents addressed by handle.
///
/// `handles` fixes the scan order; `read` is only called when the search
/// reaches that document.
pub trait DocumentRepository {
    /// Lists the document handles in scan order.
    fn handles(&self) -> Result<Vec<String>, EsiError>;

    /// Returns the XML text of one document.
    fn read(&self, handle: &str) -> Result<String, EsiError>;
}

/// Documents held in memory, scanned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    documents: Vec<(String, String)>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document; a repeated handle replaces the earlier content in place.
    pub fn insert(&mut self, handle: impl Into<String>, xml: impl Into<String>) {
        let handle = handle.into();
        let xml = xml.into();
        match self.documents.iter_mut().find(|(h, _)| *h == handle) {
            Some(slot) => slot.1 = xml,
            None => self.documents.push((handle, xml)),
        }
    }

    /// Builder-style [`MemoryRepository::insert`].
    pub fn with_document(mut self, handle: impl Into<String>, xml: impl Into<String>) -> Self {
        self.insert(handle, xml);
        self
    }
}

impl DocumentRepository for MemoryRepository {
    fn handles(&self) -> Result<Vec<String>, EsiError> {
        Ok(self.documents.iter().map(|(h, _)| h.clone()).collect())
    }

    fn read(&self, handle: &str) -> Result<String, EsiError> {
        self.documents
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, xml)| xml.clone())
            .ok_or_else(|| {
                EsiError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no document named {}", handle),
                ))
            })
    }
}

/// The `*.xml` files of one directory (not recursive), in directory-listing order.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    root: PathBuf,
}

impl DirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentRepository for DirectoryRepository {
    fn handles(&self) -> Result<Vec<String>, EsiError> {
        let mut handles = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                handles.push(name.to_owned());
            }
        }
        debug!("{} ESI documents in {}", handles.len(), self.root.display());
        Ok(handles)
    }

    fn read(&self, handle: &str) -> Result<String, EsiError> {
        // ESI files are not always UTF-8; only names and descriptions are affected.
        let bytes = fs::read(self.root.join(handle))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
