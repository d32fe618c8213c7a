//! Reminder text composition.

pub mod composer;
pub mod fallback;

pub use composer::{ComposedMessage, MessageChannel, MessageComposer, MessageSource, MessageStats};
