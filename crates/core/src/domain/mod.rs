pub mod call_record;
pub mod notification;
pub mod spam;
