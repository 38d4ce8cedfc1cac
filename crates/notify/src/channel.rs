use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use switchboard_core::domain::notification::{NotificationPayload, PublishReceipt};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel publish failed: {0}")]
    Publish(String),
    #[error("channel rejected the payload: {0}")]
    Rejected(String),
}

/// One-way publish seam for owner notifications. A successful publish means
/// the channel accepted the message, nothing more; delivery tracking is out
/// of scope.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn publish(&self, payload: NotificationPayload)
        -> Result<PublishReceipt, ChannelError>;
}

/// Accepts and drops every payload. Used when no webhook is configured.
#[derive(Default)]
pub struct NoopChannel;

#[async_trait]
impl NotificationChannel for NoopChannel {
    async fn publish(
        &self,
        _payload: NotificationPayload,
    ) -> Result<PublishReceipt, ChannelError> {
        Ok(PublishReceipt { message_id: format!("noop-{}", Uuid::new_v4().simple()) })
    }
}

/// Test double that records published payloads and can be switched into a
/// failing mode.
#[derive(Default)]
pub struct RecordingChannel {
    published: Mutex<Vec<NotificationPayload>>,
    fail_with: Option<ChannelError>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ChannelError) -> Self {
        Self { published: Mutex::new(Vec::new()), fail_with: Some(error) }
    }

    pub fn published(&self) -> Vec<NotificationPayload> {
        match self.published.lock() {
            Ok(published) => published.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn publish(
        &self,
        payload: NotificationPayload,
    ) -> Result<PublishReceipt, ChannelError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }

        match self.published.lock() {
            Ok(mut published) => published.push(payload),
            Err(poisoned) => poisoned.into_inner().push(payload),
        }
        Ok(PublishReceipt { message_id: format!("recorded-{}", Uuid::new_v4().simple()) })
    }
}
