//! Built-in notification handlers.

pub mod reminder;

pub use reminder::ReminderJobHandler;
