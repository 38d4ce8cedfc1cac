use serde::{Deserialize, Serialize};

/// Owner-facing notification content. Composed from caller fields and
/// published fire-and-forget; delivery to the end recipient is not tracked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub subject: String,
    pub body: String,
}

/// Acknowledgment from the notification channel. Confirms the publish was
/// accepted, not that anyone read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub message_id: String,
}
