/*!
# Error System for 1C Configuration Viewer

Typed errors for discovery, parsing and settings loading.
Per-file problems never surface through this type: they are logged
and the offending file is skipped. Only failures of a whole
operation (unreadable settings, broken workspace search, a missing
object requested by name) are reported to the caller.
*/

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Main error type of the viewer library
#[derive(Error, Debug)]
pub enum ViewerError {
    /// I/O error bound to a concrete path
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML document
    #[error("XML error in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Invalid or unreadable settings file
    #[error("Settings error: {0}")]
    Settings(String),

    /// Workspace file search failed
    #[error("Workspace search error: {0}")]
    Workspace(String),

    /// Requested object is not part of the loaded forest
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// JSON serialization of the forest failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn xml(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Xml {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    pub fn workspace(message: impl Into<String>) -> Self {
        Self::Workspace(message.into())
    }
}
