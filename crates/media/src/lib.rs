//! Picked-image materialization.
//!
//! A [`ContentResolver`] turns an opaque [`ContentUri`] into a MIME type and
//! an async byte stream; the [`Materializer`] drains that stream either into a
//! uniquely named cache file or into memory.

pub mod materialize;
pub mod memory;
pub mod mime;
pub mod resolver;
pub mod uri;

pub use materialize::{Materializer, Target};
pub use memory::InMemoryResolver;
pub use resolver::{ContentResolver, ContentStream, FileResolver};
pub use uri::ContentUri;
