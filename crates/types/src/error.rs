//! Unified error type for the facesession workspace.

use std::path::PathBuf;
use thiserror::Error;

/// Enumerates all error kinds that can occur across facesession crates.
#[derive(Debug, Error)]
pub enum FaceError {
    /// The client configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// The Face API returned a non-success status.
    #[error("upstream error: status={status}, body={body}")]
    Upstream { status: u16, body: String },

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required field was absent from an otherwise valid response.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// Reading or writing an image stream failed.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content resolver could not determine a MIME type for the URI.
    #[error("unknown MIME type for {0}")]
    UnknownMimeType(String),

    /// The content resolver cannot open this kind of URI.
    #[error("unsupported content URI: {0}")]
    UnsupportedUri(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "rquest")]
impl From<rquest::Error> for FaceError {
    fn from(e: rquest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl FaceError {
    /// Wraps an I/O error with the path (or URI) it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the HTTP status code if the error came from the Face API.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FaceError>;
