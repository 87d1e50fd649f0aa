//! In-memory file representation handed to the parsing service

use spec_catalog_common::{CatalogError, Result};
use std::fs;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// A named file and its raw bytes
///
/// The name is only used for format detection and display; the bytes are
/// never re-read from disk once the file has been constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    name: String,
    content: Vec<u8>,
}

impl SpecFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, keeping only its file name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| {
            CatalogError::Decode(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, content })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    /// Decode the content as UTF-8 text, dropping a leading byte order mark
    pub fn decode(&self) -> Result<String> {
        let text = std::str::from_utf8(&self.content).map_err(|e| {
            CatalogError::Decode(format!("{} is not valid UTF-8: {}", self.name, e))
        })?;
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }

    /// File name without its final extension
    pub fn stem(&self) -> String {
        file_stem(&self.name)
    }
}

/// Lowercased extension of a file name, if it has one
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// File name with directories and the final extension removed
pub fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
        .unwrap_or_else(|| file_name.to_string())
}
