//! Notification domain entities.

pub mod category;
pub mod delivery;
pub mod milestone;
pub mod preference;
pub mod scheduled;
pub mod split;
pub mod tier;
pub mod tone;

pub use category::NotificationCategory;
pub use delivery::{DeliveryChannel, DeliveryMethod, DeliveryOutcome};
pub use milestone::{MilestoneKey, MilestoneRecord};
pub use preference::{LastNotified, NotificationPreferences, PreferencesUpdate};
pub use scheduled::ScheduledNotification;
pub use split::DaySplit;
pub use tier::FrequencyTier;
pub use tone::Tone;
