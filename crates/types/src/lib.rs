//! Core types for the facesession workspace.
//!
//! This crate defines the shared data model used by every layer of the face
//! liveness session client: the unified error type, the session token request
//! and response shapes, and the materialized image representation.

pub mod error;
pub mod image;
pub mod token;

pub use error::{FaceError, Result};
pub use image::ImageBlob;
pub use token::{LivenessOperationMode, SessionToken, TokenRequest};
