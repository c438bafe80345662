use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for environment variable overrides (`FACESESSION_ENDPOINT`, `FACESESSION_KEY`).
pub const ENV_PREFIX: &str = "FACESESSION_";

/// Connection settings for the Face API, as persisted by the settings screen.
///
/// Field names on disk follow the sample app's preference keys.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Face API resource, e.g. `https://myface.cognitiveservices.azure.com`.
    #[serde(default)]
    pub endpoint: String,
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`.
    #[serde(default, rename = "key")]
    pub api_key: String,
    /// Whether the service should return liveness results to the device.
    #[serde(default, rename = "sendResultsToClient")]
    pub send_results_to_client: bool,
    /// Correlates sessions started from the same device.
    #[serde(
        default,
        rename = "deviceCorrelationId",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_correlation_id: Option<String>,
}

// The subscription key must never reach the logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("send_results_to_client", &self.send_results_to_client)
            .field("device_correlation_id", &self.device_correlation_id)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_send_results_to_client(mut self, send: bool) -> Self {
        self.send_results_to_client = send;
        self
    }

    #[must_use]
    pub fn with_device_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.device_correlation_id = Some(id.into());
        self
    }

    /// Returns `true` when both the endpoint and the key are non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Parses settings from a JSON string, merged with defaults and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the JSON is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_json(json: &str) -> Result<Self, figment::Error> {
        use figment::providers::{Format as _, Json};
        Self::figment(Json::string(json)).extract()
    }

    /// Loads settings from a file path, merged with defaults and environment overrides.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::providers::{Format as _, Json};
        Self::figment(Json::file(path)).extract()
    }

    /// Loads only what is stored in the file, merged with defaults.
    ///
    /// Environment overrides are ignored, so the result is safe to write back.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file_persisted(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::providers::{Format as _, Json};
        Self::persisted(Json::file(path)).extract()
    }

    fn persisted(source: impl figment::Provider) -> figment::Figment {
        use figment::{Figment, providers::Serialized};
        Figment::from(Serialized::defaults(ClientConfig::default())).merge(source)
    }

    fn figment(source: impl figment::Provider) -> figment::Figment {
        use figment::providers::Env;
        // Only the plain lowercase keys can be overridden from the environment;
        // figment lowercases env keys, which would never match the camelCase ones.
        Self::persisted(source).merge(Env::prefixed(ENV_PREFIX).only(&["endpoint", "key"]))
    }
}
