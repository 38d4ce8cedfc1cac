use serde::{Deserialize, Serialize};

/// Verdict for one phone number, derived per call from the reputation
/// lookup. Transient: never persisted or cached across invocations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamCheckResult {
    pub is_spam: bool,
    pub is_valid: bool,
    pub line_type: String,
    pub carrier: String,
    pub country: String,
    /// Human-readable reason for the verdict, kept for logging and audit.
    pub reason: String,
}

impl SpamCheckResult {
    /// Verdict used when spam detection is switched off.
    pub fn detection_disabled() -> Self {
        Self {
            is_spam: false,
            is_valid: true,
            line_type: "unknown".to_string(),
            carrier: "unknown".to_string(),
            country: "unknown".to_string(),
            reason: "spam_detection_disabled".to_string(),
        }
    }

    /// Fail-open verdict: a failed lookup must never block a legitimate
    /// caller, so the number is treated as not-spam and the failure is
    /// carried in the reason string.
    pub fn lookup_failed(error: impl std::fmt::Display) -> Self {
        Self {
            is_spam: false,
            is_valid: true,
            line_type: "unknown".to_string(),
            carrier: "unknown".to_string(),
            country: "unknown".to_string(),
            reason: format!("api_error: {error}"),
        }
    }
}

/// Descriptive lookup result for a phone number, used by the caller-info
/// operation. Fail-soft: unresolvable numbers come back as placeholders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerInfo {
    pub valid: bool,
    pub country_name: String,
    pub location: String,
    pub carrier: String,
    pub line_type: String,
}

impl CallerInfo {
    pub fn unknown() -> Self {
        Self {
            valid: false,
            country_name: "unknown".to_string(),
            location: "unknown".to_string(),
            carrier: "unknown".to_string(),
            line_type: "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CallerInfo, SpamCheckResult};

    #[test]
    fn disabled_detection_is_not_spam() {
        let verdict = SpamCheckResult::detection_disabled();
        assert!(!verdict.is_spam);
        assert_eq!(verdict.reason, "spam_detection_disabled");
    }

    #[test]
    fn failed_lookup_fails_open() {
        let verdict = SpamCheckResult::lookup_failed("connection refused");
        assert!(!verdict.is_spam);
        assert!(verdict.reason.starts_with("api_error:"));
    }

    #[test]
    fn unknown_caller_info_uses_placeholders() {
        let info = CallerInfo::unknown();
        assert!(!info.valid);
        assert_eq!(info.carrier, "unknown");
    }
}
