use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Request(String),
    #[error("lookup returned status {0}")]
    Status(u16),
    #[error("lookup response could not be decoded: {0}")]
    Decode(String),
}

/// Raw reputation data for one phone number, as reported by the lookup
/// service. Classification happens elsewhere; this is the service's view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupRecord {
    pub valid: bool,
    pub line_type: String,
    pub carrier: String,
    pub country_name: String,
    pub location: String,
}

#[async_trait]
pub trait ReputationLookup: Send + Sync {
    /// One lookup round trip. Malformed numbers are passed through as-is;
    /// the lookup service is the source of truth for validity.
    async fn lookup(
        &self,
        api_key: &SecretString,
        phone_number: &str,
    ) -> Result<LookupRecord, LookupError>;
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    line_type: Option<String>,
    #[serde(default)]
    carrier: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

fn field_or_unknown(value: Option<String>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => "unknown".to_string(),
    }
}

impl From<ValidateResponse> for LookupRecord {
    fn from(response: ValidateResponse) -> Self {
        Self {
            valid: response.valid,
            line_type: field_or_unknown(response.line_type),
            carrier: field_or_unknown(response.carrier),
            country_name: field_or_unknown(response.country_name),
            location: field_or_unknown(response.location),
        }
    }
}

/// HTTP client for an apilayer-style number validation endpoint. The
/// timeout is bounded because the spam-check fail-open policy hinges on this
/// call returning promptly one way or the other.
pub struct HttpReputationClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpReputationClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

#[async_trait]
impl ReputationLookup for HttpReputationClient {
    async fn lookup(
        &self,
        api_key: &SecretString,
        phone_number: &str,
    ) -> Result<LookupRecord, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("access_key", api_key.expose_secret()),
                ("number", phone_number),
                ("format", "1"),
            ])
            .send()
            .await
            .map_err(|error| LookupError::Request(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let payload = response
            .json::<ValidateResponse>()
            .await
            .map_err(|error| LookupError::Decode(error.to_string()))?;

        Ok(LookupRecord::from(payload))
    }
}
