//! Owner notifications for the caller answering agent.
//!
//! - **Channel** (`channel`) - publish trait plus noop/recording impls
//! - **Webhook** (`webhook`) - JSON POST to a configured endpoint
//! - **Compose** (`compose`) - subject/body assembly from caller fields
//!
//! Publishing is fire-and-forget: a receipt means the channel accepted the
//! message, never that the owner read it.

pub mod channel;
pub mod compose;
pub mod webhook;

pub use channel::{ChannelError, NoopChannel, NotificationChannel, RecordingChannel};
pub use compose::{compose_notification, SUBJECT_MAX_CHARS};
pub use webhook::WebhookChannel;
