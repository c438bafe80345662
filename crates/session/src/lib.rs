//! Face API liveness session creation.
//!
//! [`endpoint`] builds the session URLs, [`request`] assembles the JSON or
//! multipart request body, and [`SessionClient`] sends it and pulls the
//! `authToken` out of the response.

pub mod client;
pub mod endpoint;
pub mod request;

pub use client::SessionClient;
pub use request::RequestBody;
