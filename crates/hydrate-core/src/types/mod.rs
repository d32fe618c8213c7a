//! Shared value types exchanged with external collaborators.

pub mod message;

pub use message::{GenerationRequest, PushMessage, SmsMessage};
