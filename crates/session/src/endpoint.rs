//! Face API session endpoints.
//!
//! Sessions are created under the `v1.1-preview.1` API; the verify variant is
//! used whenever a reference image accompanies the request.

/// API version segment shared by both session endpoints.
pub const API_VERSION: &str = "v1.1-preview.1";

/// Liveness-only session path.
pub const LIVENESS_PATH: &str = "detectLiveness/singleModal/sessions";

/// Liveness-with-verify session path.
pub const LIVENESS_WITH_VERIFY_PATH: &str = "detectLivenessWithVerify/singleModal/sessions";

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Build the session creation URL for `endpoint`.
#[must_use]
pub fn session_url(endpoint: &str, with_verify: bool) -> String {
    let path = if with_verify {
        LIVENESS_WITH_VERIFY_PATH
    } else {
        LIVENESS_PATH
    };
    format!(
        "{}/face/{API_VERSION}/{path}",
        endpoint.trim().trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_url() {
        assert_eq!(
            session_url("https://face.example.com", false),
            "https://face.example.com/face/v1.1-preview.1/detectLiveness/singleModal/sessions"
        );
    }

    #[test]
    fn test_verify_url() {
        assert_eq!(
            session_url("https://face.example.com", true),
            "https://face.example.com/face/v1.1-preview.1/detectLivenessWithVerify/singleModal/sessions"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            session_url("https://face.example.com/ ", false),
            session_url("https://face.example.com", false)
        );
    }
}
