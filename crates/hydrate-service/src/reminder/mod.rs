//! Reminder decisions and the two entry points that act on them.

pub mod frequency;
pub mod milestone;
pub mod orchestrator;
pub mod scheduled;

pub use frequency::{FrequencyPolicy, select_interval};
pub use milestone::MilestoneTracker;
pub use orchestrator::{ReminderOrchestrator, ReminderRequest, ReminderResult, SkipReason};
pub use scheduled::ScheduledDelivery;
