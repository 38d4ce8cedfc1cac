use switchboard_core::config::ReputationConfig;
use switchboard_core::domain::spam::SpamCheckResult;

use crate::client::LookupRecord;

/// Derives a spam verdict from a lookup record. The line-type lists come
/// from configuration; the only built-in rule is that numbers the lookup
/// service rejects as invalid are treated as spam.
pub fn classify(record: &LookupRecord, config: &ReputationConfig) -> SpamCheckResult {
    let line_type = record.line_type.to_ascii_lowercase();

    let (is_spam, reason) = if !record.valid {
        (true, "invalid_number".to_string())
    } else if config.spam_line_types.iter().any(|candidate| candidate == &line_type) {
        (true, format!("line_type:{line_type}"))
    } else if config.flagged_line_types.iter().any(|candidate| candidate == &line_type) {
        (false, format!("{line_type}_number_flagged_for_review"))
    } else {
        (false, String::new())
    };

    SpamCheckResult {
        is_spam,
        is_valid: record.valid,
        line_type: record.line_type.clone(),
        carrier: record.carrier.clone(),
        country: record.country_name.clone(),
        reason,
    }
}
