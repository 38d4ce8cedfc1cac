use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::call_record::CallId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditCategory {
    Ingress,
    Lookup,
    Persistence,
    Notification,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    Success,
    Rejected,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub call_id: Option<CallId>,
    pub correlation_id: String,
    pub event_type: String,
    pub category: AuditCategory,
    pub actor: String,
    pub outcome: AuditOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        call_id: Option<CallId>,
        correlation_id: impl Into<String>,
        event_type: impl Into<String>,
        category: AuditCategory,
        actor: impl Into<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            call_id,
            correlation_id: correlation_id.into(),
            event_type: event_type.into(),
            category,
            actor: actor.into(),
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: AuditEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
    use crate::domain::call_record::CallId;

    #[test]
    fn in_memory_sink_records_events_in_order() {
        let sink = InMemoryAuditSink::default();

        sink.emit(AuditEvent::new(
            None,
            "corr-1",
            "action.dispatched",
            AuditCategory::Ingress,
            "agent-runtime",
            AuditOutcome::Success,
        ));
        sink.emit(
            AuditEvent::new(
                Some(CallId("CALL-1".to_string())),
                "corr-1",
                "call_record.saved",
                AuditCategory::Persistence,
                "agent-runtime",
                AuditOutcome::Success,
            )
            .with_metadata("caller_phone", "+61400000000"),
        );

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "action.dispatched");
        assert_eq!(events[1].call_id, Some(CallId("CALL-1".to_string())));
        assert_eq!(
            events[1].metadata.get("caller_phone").map(String::as_str),
            Some("+61400000000")
        );
    }

    #[test]
    fn metadata_builder_accumulates_entries() {
        let event = AuditEvent::new(
            None,
            "corr-2",
            "reputation.lookup_failed",
            AuditCategory::Lookup,
            "agent-runtime",
            AuditOutcome::Failed,
        )
        .with_metadata("reason", "timeout")
        .with_metadata("fail_open", "true");

        assert_eq!(event.metadata.len(), 2);
        assert_eq!(event.metadata.get("fail_open").map(String::as_str), Some("true"));
    }
}
