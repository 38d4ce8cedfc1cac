pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;

pub use audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use domain::call_record::{CallId, CallRecord, CallStatus};
pub use domain::notification::{NotificationPayload, PublishReceipt};
pub use domain::spam::{CallerInfo, SpamCheckResult};
pub use errors::{ApplicationError, DomainError, InterfaceError};
