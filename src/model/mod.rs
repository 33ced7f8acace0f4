pub mod alert;
pub mod event;
pub mod global_error;

pub use alert::{InboundAlert, OutboundNotification};
pub use global_error::{AppError, ErrorCode, RelayError};
