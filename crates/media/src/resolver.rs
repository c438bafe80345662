//! Content resolution: opaque URI → MIME type + readable stream.

use crate::{mime, uri::ContentUri};
use async_trait::async_trait;
use facesession_types::{FaceError, Result};
use tokio::io::AsyncRead;

/// An open content stream. Dropping it closes the underlying source.
pub type ContentStream = Box<dyn AsyncRead + Send + Unpin>;

/// Resolves content URIs handed over by an image picker.
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// The MIME type of the content, if it can be determined.
    async fn mime_type(&self, uri: &ContentUri) -> Option<String>;

    /// Open the content for reading.
    ///
    /// # Errors
    ///
    /// Returns [`FaceError::UnsupportedUri`] for URIs this resolver cannot
    /// handle, or [`FaceError::Io`] if the source cannot be opened.
    async fn open(&self, uri: &ContentUri) -> Result<ContentStream>;
}

/// Resolves `file://` URIs and bare paths on the local filesystem.
///
/// MIME types are inferred from the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

#[async_trait]
impl ContentResolver for FileResolver {
    async fn mime_type(&self, uri: &ContentUri) -> Option<String> {
        let path = uri.to_path()?;
        let ext = path.extension()?.to_str()?;
        mime::from_extension(ext).map(str::to_string)
    }

    async fn open(&self, uri: &ContentUri) -> Result<ContentStream> {
        let path = uri
            .to_path()
            .ok_or_else(|| FaceError::UnsupportedUri(uri.to_string()))?;
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| FaceError::io(&path, e))?;
        Ok(Box::new(file))
    }
}
