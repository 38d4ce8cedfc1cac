//! Phone reputation lookups for the caller answering agent.
//!
//! - **Secret store** (`secrets`) - named credential resolution
//! - **Lookup client** (`client`) - apilayer-style HTTP validation endpoint
//! - **Classifier** (`classifier`) - configuration-driven spam verdicts
//! - **Service** (`service`) - feature flag, credential cache, fail-open policy
//!
//! The fail-open policy is deliberate: a missed spam call costs less than a
//! blocked legitimate caller, so every failure path answers "not spam".

pub mod classifier;
pub mod client;
pub mod secrets;
pub mod service;

pub use client::{HttpReputationClient, LookupError, LookupRecord, ReputationLookup};
pub use secrets::{EnvSecretStore, SecretError, SecretStore, StaticSecretStore};
pub use service::SpamCheckService;
