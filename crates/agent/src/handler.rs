use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use switchboard_core::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink};
use switchboard_core::domain::call_record::{CallId, CallRecord};
use switchboard_core::errors::{ApplicationError, DomainError, InterfaceError};
use switchboard_db::repositories::CallRecordRepository;
use switchboard_notify::{compose_notification, NotificationChannel};
use switchboard_reputation::SpamCheckService;

use crate::actions::{ActionKind, ActionRequest};
use crate::envelope::ActionResponse;

const ACTOR: &str = "action-handler";

/// Executes one action per invocation on behalf of the conversational
/// runtime. Stateless across invocations; every collaborator is injected at
/// construction time. No error leaves `handle`: the runtime always gets a
/// well-formed envelope it can turn into conversation.
pub struct ActionHandler {
    records: Arc<dyn CallRecordRepository>,
    channel: Arc<dyn NotificationChannel>,
    spam: Arc<SpamCheckService>,
    audit: Arc<dyn AuditSink>,
}

impl ActionHandler {
    pub fn new(
        records: Arc<dyn CallRecordRepository>,
        channel: Arc<dyn NotificationChannel>,
        spam: Arc<SpamCheckService>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self { records, channel, spam, audit }
    }

    pub async fn handle(&self, request: ActionRequest) -> ActionResponse {
        let correlation_id = format!("req-{}", Uuid::new_v4().simple());

        let Some(action) = ActionKind::parse(&request.action_name) else {
            warn!(
                event_name = "agent.unsupported_action",
                correlation_id = %correlation_id,
                action = %request.action_name,
                "rejecting unknown action name"
            );
            self.audit.emit(
                AuditEvent::new(
                    None,
                    correlation_id.clone(),
                    "action.rejected",
                    AuditCategory::Ingress,
                    ACTOR,
                    AuditOutcome::Rejected,
                )
                .with_metadata("action", request.action_name.clone()),
            );
            let unsupported = ApplicationError::from(DomainError::UnsupportedAction(
                request.action_name.clone(),
            ));
            return error_response(&request, &correlation_id, unsupported);
        };

        info!(
            event_name = "agent.action_dispatched",
            correlation_id = %correlation_id,
            action = %action,
            "dispatching action"
        );

        let result = match action {
            ActionKind::CheckSpam => self.check_spam(&request, &correlation_id).await,
            ActionKind::SaveCallRecord => self.save_call_record(&request, &correlation_id).await,
            ActionKind::SendNotification => {
                self.send_notification(&request, &correlation_id).await
            }
            ActionKind::LookupCallerInfo => {
                self.lookup_caller_info(&request, &correlation_id).await
            }
        };

        match result {
            Ok(body) => ActionResponse::ok(&request, body),
            Err(application_error) => {
                error_response(&request, &correlation_id, application_error)
            }
        }
    }

    async fn check_spam(
        &self,
        request: &ActionRequest,
        correlation_id: &str,
    ) -> Result<Value, ApplicationError> {
        // With detection disabled the verdict is a constant, so even an
        // absent phone number must not fail the action.
        let phone_number = if self.spam.enabled() {
            request.require_param("phoneNumber")?
        } else {
            request.param_or_empty("phoneNumber")
        };

        let verdict = self.spam.check(phone_number).await;

        self.audit.emit(
            AuditEvent::new(
                None,
                correlation_id,
                "reputation.spam_checked",
                AuditCategory::Lookup,
                ACTOR,
                AuditOutcome::Success,
            )
            .with_metadata("is_spam", verdict.is_spam.to_string())
            .with_metadata("reason", verdict.reason.clone()),
        );

        Ok(json!({
            "isSpam": verdict.is_spam,
            "isValid": verdict.is_valid,
            "lineType": verdict.line_type,
            "carrier": verdict.carrier,
            "country": verdict.country,
            "reason": verdict.reason,
        }))
    }

    async fn save_call_record(
        &self,
        request: &ActionRequest,
        correlation_id: &str,
    ) -> Result<Value, ApplicationError> {
        let supplied_call_id = request
            .param("callId")
            .filter(|value| !value.trim().is_empty())
            .map(|value| CallId(value.to_string()));
        let is_spam = request.bool_param("isSpam").unwrap_or(false);

        let record = CallRecord::new(
            supplied_call_id,
            request.param_or_empty("callerName"),
            request.param_or_empty("callerPhone"),
            request.param_or_empty("reasonForCalling"),
            is_spam,
        );
        let call_id = record.call_id.clone();

        if let Err(repository_error) = self.records.insert(record).await {
            self.audit.emit(
                AuditEvent::new(
                    Some(call_id.clone()),
                    correlation_id,
                    "call_record.save_failed",
                    AuditCategory::Persistence,
                    ACTOR,
                    AuditOutcome::Failed,
                )
                .with_metadata("error", repository_error.to_string()),
            );
            return Err(ApplicationError::Persistence(repository_error.to_string()));
        }

        info!(
            event_name = "agent.call_record_saved",
            correlation_id = %correlation_id,
            call_id = %call_id,
            "call record persisted"
        );
        self.audit.emit(AuditEvent::new(
            Some(call_id.clone()),
            correlation_id,
            "call_record.saved",
            AuditCategory::Persistence,
            ACTOR,
            AuditOutcome::Success,
        ));

        Ok(json!({ "callId": call_id.0 }))
    }

    async fn send_notification(
        &self,
        request: &ActionRequest,
        correlation_id: &str,
    ) -> Result<Value, ApplicationError> {
        let call_id = request
            .param("callId")
            .filter(|value| !value.trim().is_empty())
            .map(|value| CallId(value.to_string()));

        let payload = compose_notification(
            request.param_or_empty("callerName"),
            request.param_or_empty("callerPhone"),
            request.param_or_empty("reasonForCalling"),
            call_id.as_ref(),
            request.bool_param("isSpam"),
            Utc::now(),
        );

        match self.channel.publish(payload).await {
            Ok(receipt) => {
                // The record flag is best effort: the notification already
                // went out, so a failed bookkeeping update must not fail the
                // action.
                if let Some(call_id) = &call_id {
                    match self.records.mark_notification_sent(call_id).await {
                        Ok(true) => {}
                        Ok(false) => {
                            warn!(
                                event_name = "agent.notification_mark_missed",
                                correlation_id = %correlation_id,
                                call_id = %call_id,
                                "no call record matched the notified call id"
                            );
                        }
                        Err(repository_error) => {
                            warn!(
                                event_name = "agent.notification_mark_failed",
                                correlation_id = %correlation_id,
                                call_id = %call_id,
                                error = %repository_error,
                                "could not mark call record as notified"
                            );
                        }
                    }
                }

                self.audit.emit(
                    AuditEvent::new(
                        call_id,
                        correlation_id,
                        "notification.published",
                        AuditCategory::Notification,
                        ACTOR,
                        AuditOutcome::Success,
                    )
                    .with_metadata("message_id", receipt.message_id.clone()),
                );

                Ok(json!({ "delivered": true, "messageId": receipt.message_id }))
            }
            Err(channel_error) => {
                // Non-fatal: the conversation can still conclude without the
                // owner being notified, but the failure must be visible.
                error!(
                    event_name = "agent.notification_failed",
                    correlation_id = %correlation_id,
                    error = %channel_error,
                    "notification publish failed"
                );
                self.audit.emit(
                    AuditEvent::new(
                        call_id,
                        correlation_id,
                        "notification.failed",
                        AuditCategory::Notification,
                        ACTOR,
                        AuditOutcome::Failed,
                    )
                    .with_metadata("error", channel_error.to_string()),
                );

                Ok(json!({ "delivered": false, "error": channel_error.to_string() }))
            }
        }
    }

    async fn lookup_caller_info(
        &self,
        request: &ActionRequest,
        correlation_id: &str,
    ) -> Result<Value, ApplicationError> {
        let phone_number = request.require_param("phoneNumber")?;

        let info = self.spam.caller_info(phone_number).await;

        self.audit.emit(
            AuditEvent::new(
                None,
                correlation_id,
                "reputation.caller_info",
                AuditCategory::Lookup,
                ACTOR,
                AuditOutcome::Success,
            )
            .with_metadata("valid", info.valid.to_string()),
        );

        Ok(json!({
            "valid": info.valid,
            "countryName": info.country_name,
            "location": info.location,
            "carrier": info.carrier,
            "lineType": info.line_type,
        }))
    }
}

fn error_response(
    request: &ActionRequest,
    correlation_id: &str,
    application_error: ApplicationError,
) -> ActionResponse {
    let detail = application_error.to_string();
    let interface_error = application_error.into_interface(correlation_id);

    let (status, retryable) = match &interface_error {
        InterfaceError::BadRequest { .. } => (400, false),
        InterfaceError::ServiceUnavailable { .. } => (503, true),
        InterfaceError::Internal { .. } => (500, false),
    };

    let body = json!({
        "error": detail,
        "userMessage": interface_error.user_message(),
        "retryable": retryable,
        "correlationId": correlation_id,
    });

    ActionResponse::new(request, status, body)
}
