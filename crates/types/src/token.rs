//! Liveness session token request and response shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the liveness check is performed on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivenessOperationMode {
    /// Passive liveness: no user gestures are requested.
    #[default]
    Passive,
}

/// Body of a session creation request.
///
/// Serialized as camelCase JSON, either as the whole request body or as the
/// `Parameters` part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub liveness_operation_mode: LivenessOperationMode,
    pub send_results_to_client: bool,
    pub device_correlation_id: String,
}

impl TokenRequest {
    /// Create a passive-mode request.
    pub fn passive(send_results_to_client: bool, device_correlation_id: impl Into<String>) -> Self {
        Self {
            liveness_operation_mode: LivenessOperationMode::Passive,
            send_results_to_client,
            device_correlation_id: device_correlation_id.into(),
        }
    }
}

/// Short-lived auth token handed to the on-device liveness SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
