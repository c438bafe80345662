//! Settings loading and persistence for the face liveness session client.
//!
//! Uses figment to layer defaults, the JSON settings file and `FACESESSION_*`
//! environment overrides into a [`ClientConfig`].

pub mod paths;
pub mod schema;
pub mod store;

pub use schema::ClientConfig;
pub use store::SettingsStore;
