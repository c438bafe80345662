//! Image materialization: drain a content stream into a cache file or memory.
//!
//! Failures are logged here and propagated to the caller. A cache file that
//! was partially written before a failure is left in place.

use crate::{mime, resolver::ContentResolver, uri::ContentUri};
use facesession_types::{FaceError, ImageBlob, Result};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};

/// Where a picked image should end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CacheFile,
    Buffer,
}

pub struct Materializer {
    resolver: Arc<dyn ContentResolver>,
    cache_dir: Option<PathBuf>,
}

impl Materializer {
    pub fn new(resolver: Arc<dyn ContentResolver>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            cache_dir: Some(cache_dir.into()),
        }
    }

    /// A materializer that only reads into memory. [`copy_to_cache`](Self::copy_to_cache)
    /// fails with [`FaceError::Config`].
    pub fn buffer_only(resolver: Arc<dyn ContentResolver>) -> Self {
        Self {
            resolver,
            cache_dir: None,
        }
    }

    /// Materialize `uri` as either a cache file or an in-memory buffer.
    ///
    /// # Errors
    ///
    /// See [`copy_to_cache`](Self::copy_to_cache) and [`read_to_buffer`](Self::read_to_buffer).
    pub async fn materialize(&self, uri: &ContentUri, target: Target) -> Result<ImageBlob> {
        match target {
            Target::CacheFile => self.copy_to_cache(uri).await.map(ImageBlob::Path),
            Target::Buffer => self.read_to_buffer(uri).await.map(ImageBlob::Bytes),
        }
    }

    /// Copy the content behind `uri` into `{cache_dir}/{uuid}.{subtype}` and
    /// return the new file's path.
    ///
    /// # Errors
    ///
    /// - [`FaceError::Config`] if no cache directory was given.
    /// - [`FaceError::UnknownMimeType`] if the resolver cannot type the content.
    /// - [`FaceError::Io`] if the stream cannot be opened, read or written.
    pub async fn copy_to_cache(&self, uri: &ContentUri) -> Result<PathBuf> {
        self.try_copy_to_cache(uri).await.inspect_err(|e| {
            tracing::error!(uri = %uri, error = %e, "failed to copy image to cache");
        })
    }

    /// Read the content behind `uri` fully into memory.
    ///
    /// # Errors
    ///
    /// Returns [`FaceError::Io`] if the stream cannot be opened or read.
    pub async fn read_to_buffer(&self, uri: &ContentUri) -> Result<Vec<u8>> {
        self.try_read_to_buffer(uri).await.inspect_err(|e| {
            tracing::error!(uri = %uri, error = %e, "failed to read image");
        })
    }

    async fn try_copy_to_cache(&self, uri: &ContentUri) -> Result<PathBuf> {
        let cache_dir = self
            .cache_dir
            .as_deref()
            .ok_or_else(|| FaceError::Config("no cache directory configured".to_string()))?;
        let mime_type = self
            .resolver
            .mime_type(uri)
            .await
            .ok_or_else(|| FaceError::UnknownMimeType(uri.to_string()))?;
        let ext = mime::subtype(&mime_type)
            .ok_or_else(|| FaceError::UnknownMimeType(uri.to_string()))?;

        tokio::fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| FaceError::io(cache_dir, e))?;
        let path = cache_dir.join(format!("{}.{ext}", uuid::Uuid::new_v4()));

        let mut input = self.resolver.open(uri).await?;
        let mut output = tokio::fs::File::create(&path)
            .await
            .map_err(|e| FaceError::io(&path, e))?;
        let copied = tokio::io::copy(&mut input, &mut output)
            .await
            .map_err(|e| FaceError::io(&path, e))?;
        output.flush().await.map_err(|e| FaceError::io(&path, e))?;

        tracing::debug!(uri = %uri, path = %path.display(), bytes = copied, "image cached");
        Ok(path)
    }

    async fn try_read_to_buffer(&self, uri: &ContentUri) -> Result<Vec<u8>> {
        let mut input = self.resolver.open(uri).await?;
        let mut buf = Vec::new();
        input
            .read_to_end(&mut buf)
            .await
            .map_err(|e| FaceError::io(uri.as_str(), e))?;
        tracing::debug!(uri = %uri, bytes = buf.len(), "image buffered");
        Ok(buf)
    }
}
