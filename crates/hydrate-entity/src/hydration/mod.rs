//! Hydration log entities.

pub mod event;
pub mod streak;

pub use event::HydrationEvent;
pub use streak::StreakState;
