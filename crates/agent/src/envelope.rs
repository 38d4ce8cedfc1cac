use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::ActionRequest;

pub const MESSAGE_VERSION: &str = "1.0";

/// Response envelope returned for every invocation. Field names are part of
/// the calling runtime's contract and must not drift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub message_version: String,
    pub response: ResponsePayload,
    pub session_attributes: HashMap<String, String>,
    pub prompt_session_attributes: HashMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub action_group: String,
    pub action_name: String,
    pub http_status_code: u16,
    pub response_body: Value,
}

impl ActionResponse {
    pub fn new(request: &ActionRequest, http_status_code: u16, response_body: Value) -> Self {
        Self {
            message_version: MESSAGE_VERSION.to_string(),
            response: ResponsePayload {
                action_group: request.action_group.clone().unwrap_or_default(),
                action_name: request.action_name.clone(),
                http_status_code,
                response_body,
            },
            session_attributes: request.session_attributes.clone(),
            prompt_session_attributes: request.prompt_session_attributes.clone(),
        }
    }

    pub fn ok(request: &ActionRequest, response_body: Value) -> Self {
        Self::new(request, 200, response_body)
    }

    pub fn status(&self) -> u16 {
        self.response.http_status_code
    }

    pub fn body(&self) -> &Value {
        &self.response.response_body
    }
}
