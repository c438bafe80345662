//! Materialized image representation.

use std::path::{Path, PathBuf};

/// A picked image after it has been pulled out of its content stream.
///
/// The caller owns the blob; for the `Path` variant that includes the cache
/// file, which is never cleaned up by this workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageBlob {
    /// Copied into a file in the cache directory.
    Path(PathBuf),
    /// Buffered fully in memory.
    Bytes(Vec<u8>),
}

impl ImageBlob {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Bytes(_) => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Path(_) => None,
            Self::Bytes(b) => Some(b),
        }
    }
}
