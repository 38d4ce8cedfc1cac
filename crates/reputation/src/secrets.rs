use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("secret `{0}` was not found")]
    NotFound(String),
    #[error("secret `{0}` is empty")]
    Empty(String),
}

/// Named-secret resolution. The configuration carries the *name* of the
/// credential; where that name resolves to is a deployment concern.
pub trait SecretStore: Send + Sync {
    fn get(&self, name: &str) -> Result<SecretString, SecretError>;
}

/// Resolves secret names directly against process environment variables.
#[derive(Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for EnvSecretStore {
    fn get(&self, name: &str) -> Result<SecretString, SecretError> {
        let value =
            std::env::var(name).map_err(|_| SecretError::NotFound(name.to_string()))?;
        if value.trim().is_empty() {
            return Err(SecretError::Empty(name.to_string()));
        }
        Ok(value.into())
    }
}

/// Fixed name/value secret store for tests and local wiring.
#[derive(Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, SecretString>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into().into());
        self
    }
}

impl SecretStore for StaticSecretStore {
    fn get(&self, name: &str) -> Result<SecretString, SecretError> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }
}
