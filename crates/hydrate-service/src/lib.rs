//! # hydrate-service
//!
//! Business logic for the Hydrate reminder engine. Services follow
//! constructor injection: stores and transports are provided at
//! construction time as `Arc<dyn Trait>` references, and nothing in this
//! crate holds global state.

pub mod analytics;
pub mod delivery;
pub mod hydration;
pub mod message;
pub mod reminder;

#[cfg(test)]
pub(crate) mod test_support;

pub use analytics::AnalyticsRecorder;
pub use delivery::{DeliveryDispatcher, OutboundMessage};
pub use hydration::{ProgressSnapshot, ProgressTracker, StreakSummary};
pub use message::{ComposedMessage, MessageChannel, MessageComposer, MessageSource, MessageStats};
pub use reminder::{
    FrequencyPolicy, MilestoneTracker, ReminderOrchestrator, ReminderRequest, ReminderResult,
    ScheduledDelivery, SkipReason,
};
