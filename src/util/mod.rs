pub mod body;
pub mod notifier;

pub use notifier::ChatNotifier;
