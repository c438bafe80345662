//! In-memory content resolver backed by a `HashMap` behind a `Mutex`.

use crate::{resolver::ContentResolver, resolver::ContentStream, uri::ContentUri};
use async_trait::async_trait;
use facesession_types::{FaceError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

struct Entry {
    mime: Option<String>,
    bytes: Vec<u8>,
}

/// A [`ContentResolver`] implementation for testing and ephemeral use.
pub struct InMemoryResolver {
    /// URI-keyed content map.
    data: Mutex<HashMap<ContentUri, Entry>>,
}

impl InMemoryResolver {
    /// Creates a new empty in-memory resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }

    /// Registers (or replaces) content under `uri`.
    pub fn insert(&self, uri: impl Into<ContentUri>, mime: Option<&str>, bytes: impl Into<Vec<u8>>) {
        self.data.lock().unwrap().insert(
            uri.into(),
            Entry {
                mime: mime.map(str::to_string),
                bytes: bytes.into(),
            },
        );
    }
}

impl Default for InMemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentResolver for InMemoryResolver {
    async fn mime_type(&self, uri: &ContentUri) -> Option<String> {
        self.data
            .lock()
            .unwrap()
            .get(uri)
            .and_then(|e| e.mime.clone())
    }

    async fn open(&self, uri: &ContentUri) -> Result<ContentStream> {
        let bytes = self
            .data
            .lock()
            .unwrap()
            .get(uri)
            .map(|e| e.bytes.clone())
            .ok_or_else(|| {
                FaceError::io(
                    uri.as_str(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no content for URI"),
                )
            })?;
        Ok(Box::new(std::io::Cursor::new(bytes)))
    }
}
