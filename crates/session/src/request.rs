//! Session request body assembly.
//!
//! Without a reference image the body is the plain [`TokenRequest`] JSON. With
//! one, a two-part `multipart/form-data` body is written by hand: a
//! `Parameters` part holding the JSON and a binary `VerifyImage` part.

use facesession_types::{Result, TokenRequest};

const CRLF: &str = "\r\n";
const CHARSET: &str = "UTF-8";

/// A fully serialized request body together with its `Content-Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl RequestBody {
    /// JSON body when `image` is `None`, multipart with a fresh boundary otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`facesession_types::FaceError::Serialization`] if the request cannot be encoded.
    pub fn build(request: &TokenRequest, image: Option<&[u8]>) -> Result<Self> {
        match image {
            Some(image) => Self::multipart(request, image, &new_boundary()),
            None => Self::json(request),
        }
    }

    /// Plain `application/json` body.
    ///
    /// # Errors
    ///
    /// Returns [`facesession_types::FaceError::Serialization`] if the request cannot be encoded.
    pub fn json(request: &TokenRequest) -> Result<Self> {
        Ok(Self {
            content_type: format!("application/json; charset={CHARSET}"),
            bytes: serde_json::to_vec(request)?,
        })
    }

    /// Multipart body with `Parameters` and `VerifyImage` parts separated by `boundary`.
    ///
    /// # Errors
    ///
    /// Returns [`facesession_types::FaceError::Serialization`] if the request cannot be encoded.
    pub fn multipart(request: &TokenRequest, image: &[u8], boundary: &str) -> Result<Self> {
        let params = serde_json::to_string(request)?;

        let mut head = String::new();
        head.push_str(&format!("--{boundary}{CRLF}"));
        head.push_str(&format!("Content-Type: application/json; charset={CHARSET}{CRLF}"));
        head.push_str(&format!("Content-Disposition: form-data; name=Parameters{CRLF}"));
        head.push_str(&format!("{CRLF}{params}{CRLF}"));

        head.push_str(&format!("--{boundary}{CRLF}"));
        head.push_str(&format!(
            "Content-Disposition: form-data; name=VerifyImage; filename=VerifyImage{CRLF}"
        ));
        head.push_str(&format!("Content-Type: application/octet-stream{CRLF}"));
        head.push_str(&format!("Content-Transfer-Encoding: binary{CRLF}"));
        head.push_str(CRLF);

        let tail = format!("{CRLF}{CRLF}--{boundary}--{CRLF}");

        let mut bytes = Vec::with_capacity(head.len() + image.len() + tail.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(image);
        bytes.extend_from_slice(tail.as_bytes());

        Ok(Self {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            bytes,
        })
    }

    /// The multipart boundary, if this is a multipart body.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.content_type
            .strip_prefix("multipart/form-data; boundary=")
    }
}

/// A random boundary (UUID v4) for a multipart body.
#[must_use]
pub fn new_boundary() -> String {
    uuid::Uuid::new_v4().to_string()
}
