//! Action Handler - the execution seam behind the caller answering agent
//!
//! A managed conversational runtime talks to the caller; whenever the
//! conversation needs a side effect or an external fact it invokes this
//! handler with one named action and a string parameter map. The handler:
//! - validates the action name against a closed set of operations
//! - routes to exactly one operation per invocation
//! - translates every outcome, including downstream failures, into the
//!   response envelope the runtime expects
//!
//! # Operations
//!
//! - `checkSpam` - reputation verdict for a phone number (fail-open)
//! - `saveCallRecord` - persist one completed call
//! - `sendNotification` - publish a call summary to the owner (non-fatal)
//! - `lookupCallerInfo` - descriptive number lookup (fail-soft)
//!
//! # Failure policy
//!
//! Nothing escapes the dispatcher. Unsupported actions and missing
//! parameters become client-style error envelopes, persistence failures
//! become retryable ones, and lookup/notification failures degrade inside a
//! success envelope so the conversation can continue gracefully.

pub mod actions;
pub mod envelope;
pub mod handler;

pub use actions::{ActionKind, ActionRequest};
pub use envelope::{ActionResponse, ResponsePayload, MESSAGE_VERSION};
pub use handler::ActionHandler;
