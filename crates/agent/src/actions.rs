use std::collections::HashMap;

use serde::Deserialize;

use switchboard_core::errors::DomainError;

/// The closed set of operations the conversational runtime may invoke.
/// Extending the agent means adding a variant here and letting the compiler
/// point at every match that needs a new arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    CheckSpam,
    SaveCallRecord,
    SendNotification,
    LookupCallerInfo,
}

impl ActionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "checkSpam" => Some(Self::CheckSpam),
            "saveCallRecord" => Some(Self::SaveCallRecord),
            "sendNotification" => Some(Self::SendNotification),
            "lookupCallerInfo" => Some(Self::LookupCallerInfo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckSpam => "checkSpam",
            Self::SaveCallRecord => "saveCallRecord",
            Self::SendNotification => "sendNotification",
            Self::LookupCallerInfo => "lookupCallerInfo",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One invocation from the conversational runtime: an action name, a flat
/// string parameter map, and opaque session context that is echoed back
/// untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default)]
    pub action_group: Option<String>,
    pub action_name: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    #[serde(default)]
    pub session_attributes: HashMap<String, String>,
    #[serde(default)]
    pub prompt_session_attributes: HashMap<String, String>,
}

impl ActionRequest {
    pub fn new(action_name: impl Into<String>) -> Self {
        Self { action_name: action_name.into(), ..Self::default() }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Parameter that must be present and non-empty.
    pub fn require_param(&self, name: &str) -> Result<&str, DomainError> {
        self.param(name).filter(|value| !value.trim().is_empty()).ok_or_else(|| {
            DomainError::MissingParameter {
                action: self.action_name.clone(),
                name: name.to_string(),
            }
        })
    }

    /// Optional parameter defaulting to the empty string. Callers may
    /// legitimately decline to provide these fields.
    pub fn param_or_empty(&self, name: &str) -> &str {
        self.param(name).unwrap_or("")
    }

    /// Boolean parameter. The runtime serializes every value as a string, so
    /// `"true"`/`"True"` and `"false"`/`"False"` are coerced.
    pub fn bool_param(&self, name: &str) -> Option<bool> {
        match self.param(name) {
            Some("true") | Some("True") => Some(true),
            Some("false") | Some("False") => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use switchboard_core::errors::DomainError;

    use super::{ActionKind, ActionRequest};

    #[test]
    fn known_action_names_parse_to_variants() {
        assert_eq!(ActionKind::parse("checkSpam"), Some(ActionKind::CheckSpam));
        assert_eq!(ActionKind::parse("saveCallRecord"), Some(ActionKind::SaveCallRecord));
        assert_eq!(ActionKind::parse("sendNotification"), Some(ActionKind::SendNotification));
        assert_eq!(ActionKind::parse("lookupCallerInfo"), Some(ActionKind::LookupCallerInfo));
    }

    #[test]
    fn unknown_and_miscased_action_names_are_rejected() {
        assert_eq!(ActionKind::parse("transferCall"), None);
        assert_eq!(ActionKind::parse("checkspam"), None);
        assert_eq!(ActionKind::parse(""), None);
    }

    #[test]
    fn required_parameters_reject_blank_values() {
        let request = ActionRequest::new("checkSpam").with_parameter("phoneNumber", "   ");

        let error = request.require_param("phoneNumber").expect_err("blank value should fail");
        assert!(matches!(error, DomainError::MissingParameter { ref name, .. } if name == "phoneNumber"));
    }

    #[test]
    fn boolean_parameters_coerce_runtime_string_values() {
        let request = ActionRequest::new("saveCallRecord")
            .with_parameter("isSpam", "True")
            .with_parameter("other", "yes");

        assert_eq!(request.bool_param("isSpam"), Some(true));
        assert_eq!(request.bool_param("other"), None);
        assert_eq!(request.bool_param("absent"), None);
    }

    #[test]
    fn request_deserializes_from_runtime_json() {
        let request: ActionRequest = serde_json::from_str(
            r#"{
                "actionGroup": "CallerManagementActions",
                "actionName": "checkSpam",
                "parameters": {"phoneNumber": "+61400000000"},
                "sessionAttributes": {"conversationId": "c-1"}
            }"#,
        )
        .expect("request should deserialize");

        assert_eq!(request.action_name, "checkSpam");
        assert_eq!(request.param("phoneNumber"), Some("+61400000000"));
        assert_eq!(
            request.session_attributes.get("conversationId").map(String::as_str),
            Some("c-1")
        );
    }
}
