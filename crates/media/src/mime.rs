//! MIME helpers for picked images.

/// MIME types the image picker offers.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Whether `mime` is one of [`ACCEPTED_MIME_TYPES`] (parameters ignored).
#[must_use]
pub fn is_accepted_mime_type(mime: &str) -> bool {
    let essence = essence(mime);
    ACCEPTED_MIME_TYPES
        .iter()
        .any(|m| m.eq_ignore_ascii_case(essence))
}

/// The part after `/`, e.g. `png` for `image/png`; used as the cache file extension.
#[must_use]
pub fn subtype(mime: &str) -> Option<&str> {
    essence(mime)
        .split_once('/')
        .map(|(_, sub)| sub.trim())
        .filter(|sub| !sub.is_empty())
}

/// Guess an image MIME type from a file extension.
#[must_use]
pub fn from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn essence(mime: &str) -> &str {
    mime.split(';').next().unwrap_or(mime).trim()
}
