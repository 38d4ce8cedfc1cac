use async_trait::async_trait;
use thiserror::Error;

use switchboard_core::domain::call_record::{CallId, CallRecord};

pub mod call_record;
pub mod memory;

pub use call_record::SqlCallRecordRepository;
pub use memory::InMemoryCallRecordRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CallRecordRepository: Send + Sync {
    /// Persists one record. A fresh `(call_id, timestamp)` pair per call is
    /// the only idempotency guarantee; re-invocation inserts a new row.
    async fn insert(&self, record: CallRecord) -> Result<(), RepositoryError>;

    async fn find_by_call_id(&self, id: &CallId) -> Result<Option<CallRecord>, RepositoryError>;

    /// Call history for one phone number, most recent first.
    async fn history_for_phone(
        &self,
        caller_phone: &str,
        limit: u32,
    ) -> Result<Vec<CallRecord>, RepositoryError>;

    /// Flips `notification_sent` for an existing record. Returns false when
    /// no record matched; callers treat that as non-critical.
    async fn mark_notification_sent(&self, id: &CallId) -> Result<bool, RepositoryError>;
}
