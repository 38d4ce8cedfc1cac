use chrono::{DateTime, Utc};

use switchboard_core::domain::call_record::CallId;
use switchboard_core::domain::notification::NotificationPayload;

/// Subject-line cap carried over from email-style notification channels.
pub const SUBJECT_MAX_CHARS: usize = 100;

/// Builds the owner-facing notification for one call. Empty caller fields
/// are allowed; the subject falls back to a generic label so it stays
/// readable in an inbox.
pub fn compose_notification(
    caller_name: &str,
    caller_phone: &str,
    reason: &str,
    call_id: Option<&CallId>,
    is_spam: Option<bool>,
    at: DateTime<Utc>,
) -> NotificationPayload {
    let display_name = if caller_name.trim().is_empty() { "Unknown Caller" } else { caller_name };

    let subject = truncate_subject(&format!("Missed Call from {display_name}"));

    let mut body = String::new();
    body.push_str("You have a new message from a caller.\n\n");
    body.push_str("--- Call Details ---\n");
    body.push_str(&format!("Caller Name: {caller_name}\n"));
    body.push_str(&format!("Phone Number: {caller_phone}\n"));
    body.push_str(&format!("Reason/Message: {reason}\n"));
    body.push_str(&format!(
        "Call ID: {}\n",
        call_id.map(|id| id.0.as_str()).unwrap_or("unknown")
    ));
    if let Some(is_spam) = is_spam {
        body.push_str(&format!("Flagged As Spam: {}\n", if is_spam { "yes" } else { "no" }));
    }
    body.push_str(&format!("Time: {}\n", at.format("%Y-%m-%d %H:%M:%S UTC")));
    body.push_str("---\n\n");
    body.push_str("This message was recorded by your automated caller agent.");

    NotificationPayload { subject, body }
}

fn truncate_subject(subject: &str) -> String {
    subject.chars().take(SUBJECT_MAX_CHARS).collect()
}
