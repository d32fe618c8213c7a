//! PostgreSQL implementations of the store traits.

pub mod analytics;
pub mod event;
pub mod milestone;
pub mod preference;
pub mod scheduled;
pub mod streak;

pub use analytics::AnalyticsRepository;
pub use event::EventRepository;
pub use milestone::MilestoneRepository;
pub use preference::PreferencesRepository;
pub use scheduled::ScheduledNotificationRepository;
pub use streak::StreakRepository;
