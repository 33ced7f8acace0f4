pub mod event_log;
pub mod health_check;
pub mod webhook;

pub use crate::api::event_log::log_event;
pub use crate::api::webhook::{method_not_allowed, receive_webhook};
