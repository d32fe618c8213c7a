//! Analytics entities.

pub mod event;

pub use event::{AnalyticsEvent, AnalyticsEventType};
