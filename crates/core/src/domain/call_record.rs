use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl CallId {
    pub fn generate() -> Self {
        Self(format!("CALL-{}", Uuid::new_v4().simple()))
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Completed,
    SpamBlocked,
}

impl CallStatus {
    pub fn from_spam_verdict(is_spam: bool) -> Self {
        if is_spam {
            Self::SpamBlocked
        } else {
            Self::Completed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::SpamBlocked => "spam_blocked",
        }
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "completed" => Ok(Self::Completed),
            "spam_blocked" => Ok(Self::SpamBlocked),
            other => Err(format!("unknown call status `{other}`")),
        }
    }
}

/// One completed interaction with a caller. Created once by the save-record
/// operation and never rewritten; only `notification_sent` may flip to true
/// after the owner notification goes out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    pub timestamp: DateTime<Utc>,
    pub caller_name: String,
    pub caller_phone: String,
    pub reason: String,
    pub is_spam: bool,
    pub status: CallStatus,
    pub notification_sent: bool,
}

impl CallRecord {
    pub fn new(
        call_id: Option<CallId>,
        caller_name: impl Into<String>,
        caller_phone: impl Into<String>,
        reason: impl Into<String>,
        is_spam: bool,
    ) -> Self {
        Self {
            call_id: call_id.unwrap_or_else(CallId::generate),
            timestamp: Utc::now(),
            caller_name: caller_name.into(),
            caller_phone: caller_phone.into(),
            reason: reason.into(),
            is_spam,
            status: CallStatus::from_spam_verdict(is_spam),
            notification_sent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CallId, CallRecord, CallStatus};

    #[test]
    fn generated_call_ids_are_unique_and_prefixed() {
        let first = CallId::generate();
        let second = CallId::generate();

        assert!(first.0.starts_with("CALL-"));
        assert_ne!(first, second);
    }

    #[test]
    fn supplied_call_id_is_honored() {
        let record =
            CallRecord::new(Some(CallId("CALL-fixed".to_string())), "Ada", "+61400000000", "", false);
        assert_eq!(record.call_id.0, "CALL-fixed");
    }

    #[test]
    fn status_derives_from_spam_verdict() {
        let clean = CallRecord::new(None, "Ada", "+61400000000", "invoice question", false);
        let spam = CallRecord::new(None, "", "+1900000000", "", true);

        assert_eq!(clean.status, CallStatus::Completed);
        assert_eq!(spam.status, CallStatus::SpamBlocked);
        assert!(!clean.notification_sent);
    }

    #[test]
    fn empty_optional_fields_are_preserved_verbatim() {
        let record = CallRecord::new(None, "", "+61400000000", "", false);

        assert_eq!(record.caller_name, "");
        assert_eq!(record.reason, "");
    }
}
