//! Liveness session client.
//!
//! Sends one session creation request per call and extracts the `authToken`.
//! The response is consumed inside the call, so the connection is released on
//! every exit path.

use crate::{
    endpoint::{self, SUBSCRIPTION_KEY_HEADER},
    request::RequestBody,
};
use facesession_config::ClientConfig;
use facesession_types::{FaceError, Result, SessionToken, TokenRequest};
use rquest::Client;

/// Creates Face API liveness sessions.
#[derive(Clone)]
pub struct SessionClient {
    http: Client,
}

impl Default for SessionClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl SessionClient {
    /// Creates a new client wrapping the given HTTP client.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Obtain a session token, returning an empty string on any failure.
    ///
    /// Incomplete settings short-circuit without touching the network. Every
    /// other failure is logged and swallowed.
    pub async fn acquire_token(&self, config: &ClientConfig, verify_image: Option<&[u8]>) -> String {
        if !config.is_complete() {
            tracing::warn!("endpoint or key not configured, skipping session creation");
            return String::new();
        }
        match self.request_token(config, verify_image).await {
            Ok(token) => token.into_inner(),
            Err(e) => {
                tracing::error!(error = %e, "failed to create liveness session");
                String::new()
            }
        }
    }

    /// Create a liveness session, or a liveness-with-verify session when
    /// `verify_image` is given, and return its token.
    ///
    /// # Errors
    ///
    /// - [`FaceError::Config`] if the endpoint or key is blank (no request is sent).
    /// - [`FaceError::Http`] on transport failure.
    /// - [`FaceError::Upstream`] on a non-success status.
    /// - [`FaceError::Serialization`] / [`FaceError::MissingField`] on a malformed response.
    pub async fn request_token(
        &self,
        config: &ClientConfig,
        verify_image: Option<&[u8]>,
    ) -> Result<SessionToken> {
        if !config.is_complete() {
            return Err(FaceError::Config(
                "endpoint and key must both be set".into(),
            ));
        }

        let url = endpoint::session_url(&config.endpoint, verify_image.is_some());
        let device_id = config
            .device_correlation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let token_request = TokenRequest::passive(config.send_results_to_client, device_id);
        let body = RequestBody::build(&token_request, verify_image)?;

        tracing::debug!(
            url = %url,
            content_type = %body.content_type,
            bytes = body.bytes.len(),
            "creating liveness session"
        );

        let resp = self
            .http
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, config.api_key.as_str())
            .header("Content-Type", body.content_type.as_str())
            .body(body.bytes)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or_default(),
                "session create failed"
            );
            tracing::debug!(body = %text, "session create error body");
            return Err(FaceError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = serde_json::from_str(&text)?;
        parse_token_response(&json)
    }
}

/// Extract the session token from a session creation response.
///
/// # Errors
///
/// Returns [`FaceError::MissingField`] if `authToken` is absent or not a string.
pub fn parse_token_response(json: &serde_json::Value) -> Result<SessionToken> {
    json.get("authToken")
        .and_then(serde_json::Value::as_str)
        .map(SessionToken::new)
        .ok_or(FaceError::MissingField("authToken"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request bytes.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            request
        });

        (endpoint, handle)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return buf;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(head_end) = find(&buf, b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    return buf;
                }
            }
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn split_request(raw: &[u8]) -> (String, Vec<u8>) {
        let head_end = find(raw, b"\r\n\r\n").unwrap();
        (
            String::from_utf8_lossy(&raw[..head_end]).to_string(),
            raw[head_end + 4..].to_vec(),
        )
    }

    fn config(endpoint: &str) -> ClientConfig {
        ClientConfig::new(endpoint, "test-key").with_device_correlation_id("device-1")
    }

    #[test]
    fn test_parse_token_response_ok() {
        let tok = parse_token_response(&json!({"authToken": "abc", "sessionId": "s1"})).unwrap();
        assert_eq!(tok.as_str(), "abc");
    }

    #[test]
    fn test_parse_token_response_missing() {
        let err = parse_token_response(&json!({"sessionId": "s1"})).unwrap_err();
        assert!(matches!(err, FaceError::MissingField("authToken")));
    }

    #[test]
    fn test_parse_token_response_not_a_string() {
        assert!(parse_token_response(&json!({"authToken": 42})).is_err());
    }

    #[tokio::test]
    async fn test_blank_endpoint_returns_empty() {
        let client = SessionClient::default();
        let token = client.acquire_token(&ClientConfig::new("", "key"), None).await;
        assert!(token.is_empty());
    }

    #[tokio::test]
    async fn test_blank_key_makes_no_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let client = SessionClient::default();

        let token = client
            .acquire_token(&ClientConfig::new(endpoint, "  "), Some(b"img"))
            .await;
        assert!(token.is_empty());

        let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(accepted.is_err(), "no connection should have been opened");
    }

    #[tokio::test]
    async fn test_request_token_incomplete_config_is_config_error() {
        let err = SessionClient::default()
            .request_token(&ClientConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FaceError::Config(_)));
    }

    #[tokio::test]
    async fn test_json_session_success() {
        let (endpoint, server) = serve_once("200 OK", r#"{"authToken":"abc"}"#).await;
        let client = SessionClient::default();

        let token = client.acquire_token(&config(&endpoint), None).await;
        assert_eq!(token, "abc");

        let (head, body) = split_request(&server.await.unwrap());
        assert!(head.starts_with(
            "POST /face/v1.1-preview.1/detectLiveness/singleModal/sessions "
        ));
        let head = head.to_ascii_lowercase();
        assert!(head.contains("ocp-apim-subscription-key: test-key"));
        assert!(head.contains("content-type: application/json; charset=utf-8"));

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["livenessOperationMode"], "Passive");
        assert_eq!(json["sendResultsToClient"], false);
        assert_eq!(json["deviceCorrelationId"], "device-1");
    }

    #[tokio::test]
    async fn test_multipart_session_success() {
        let (endpoint, server) = serve_once("200 OK", r#"{"authToken":"verify-tok"}"#).await;
        let client = SessionClient::default();
        let image = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        let token = client
            .request_token(&config(&endpoint), Some(&image))
            .await
            .unwrap();
        assert_eq!(token.as_str(), "verify-tok");

        let (head, body) = split_request(&server.await.unwrap());
        assert!(head.starts_with(
            "POST /face/v1.1-preview.1/detectLivenessWithVerify/singleModal/sessions "
        ));
        let content_type = head
            .lines()
            .find_map(|l| {
                let lower = l.to_ascii_lowercase();
                lower
                    .starts_with("content-type:")
                    .then(|| l["content-type:".len()..].trim().to_string())
            })
            .unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();

        let opener = format!("--{boundary}\r\n");
        let sections = body
            .windows(opener.len())
            .filter(|w| *w == opener.as_bytes())
            .count();
        assert_eq!(sections, 2);
        assert!(body.ends_with(format!("--{boundary}--\r\n").as_bytes()));
        assert!(find(&body, &image).is_some());
    }

    #[tokio::test]
    async fn test_non_success_returns_empty() {
        let (endpoint, server) =
            serve_once("401 Unauthorized", r#"{"error":{"code":"401"}}"#).await;
        let token = SessionClient::default()
            .acquire_token(&config(&endpoint), None)
            .await;
        assert!(token.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_surfaces_upstream_error() {
        let (endpoint, _server) = serve_once("429 Too Many Requests", r#"{"error":"slow"}"#).await;
        let err = SessionClient::default()
            .request_token(&config(&endpoint), None)
            .await
            .unwrap_err();
        match err {
            FaceError::Upstream { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("slow"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_auth_token_is_error() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"sessionId":"s1"}"#).await;
        let client = SessionClient::default();
        let err = client
            .request_token(&config(&endpoint), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FaceError::MissingField("authToken")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_empty() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let token = SessionClient::default()
            .acquire_token(&config(&endpoint), None)
            .await;
        assert!(token.is_empty());
    }
}
