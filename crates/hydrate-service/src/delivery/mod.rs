//! Multi-channel delivery.

pub mod dispatcher;

pub use dispatcher::{DeliveryDispatcher, NO_CHANNEL, OutboundMessage};
