//! Error types for conversion operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a page to Markdown
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A block in a block sequence has no renderer
    #[error("Unsupported block type: {kind} (block {id})")]
    UnsupportedNodeKind { kind: String, id: String },

    /// Reading or writing an export file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An export file did not hold the expected JSON
    #[error("Invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// The unsupported kind, if this error is an [`ConvertError::UnsupportedNodeKind`].
    pub fn unsupported_kind(&self) -> Option<&str> {
        match self {
            ConvertError::UnsupportedNodeKind { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
