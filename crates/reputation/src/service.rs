use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::warn;

use switchboard_core::config::ReputationConfig;
use switchboard_core::domain::spam::{CallerInfo, SpamCheckResult};

use crate::classifier::classify;
use crate::client::{LookupError, LookupRecord, ReputationLookup};
use crate::secrets::{SecretError, SecretStore};

#[derive(Debug, thiserror::Error)]
enum ServiceError {
    #[error("credential resolution failed: {0}")]
    Secret(#[from] SecretError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Spam-check front door. Owns the feature flag, the credential cache, and
/// the fail-open policy; the raw lookup and the secret store are injected.
pub struct SpamCheckService {
    config: ReputationConfig,
    secrets: Arc<dyn SecretStore>,
    lookup: Arc<dyn ReputationLookup>,
    // The credential is resolved once per process, mirroring how often the
    // underlying secret is expected to rotate.
    api_key: OnceCell<SecretString>,
}

impl SpamCheckService {
    pub fn new(
        config: ReputationConfig,
        secrets: Arc<dyn SecretStore>,
        lookup: Arc<dyn ReputationLookup>,
    ) -> Self {
        Self { config, secrets, lookup, api_key: OnceCell::new() }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Verdict for one phone number. Infallible by design: when detection is
    /// disabled this short-circuits without any external call, and when the
    /// lookup fails the caller is treated as not-spam (fail open) with the
    /// failure reported as a warning.
    pub async fn check(&self, phone_number: &str) -> SpamCheckResult {
        if !self.config.enabled {
            return SpamCheckResult::detection_disabled();
        }

        match self.lookup_record(phone_number).await {
            Ok(record) => classify(&record, &self.config),
            Err(error) => {
                warn!(
                    event_name = "reputation.lookup_failed",
                    caller_phone = %phone_number,
                    error = %error,
                    fail_open = true,
                    "reputation lookup failed; treating caller as not-spam"
                );
                SpamCheckResult::lookup_failed(error)
            }
        }
    }

    /// Descriptive lookup for the caller-info operation. Fail-soft: any
    /// failure yields placeholder values rather than an error.
    pub async fn caller_info(&self, phone_number: &str) -> CallerInfo {
        match self.lookup_record(phone_number).await {
            Ok(record) => CallerInfo {
                valid: record.valid,
                country_name: record.country_name,
                location: record.location,
                carrier: record.carrier,
                line_type: record.line_type,
            },
            Err(error) => {
                warn!(
                    event_name = "reputation.caller_info_failed",
                    caller_phone = %phone_number,
                    error = %error,
                    "caller info lookup failed; returning placeholders"
                );
                CallerInfo::unknown()
            }
        }
    }

    async fn lookup_record(&self, phone_number: &str) -> Result<LookupRecord, ServiceError> {
        let api_key = self
            .api_key
            .get_or_try_init(|| async { self.secrets.get(&self.config.api_key_secret) })
            .await?;

        Ok(self.lookup.lookup(api_key, phone_number).await?)
    }
}
