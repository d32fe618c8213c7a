//! Daily totals, streaks, and per-user progress.

pub mod aggregator;
pub mod tracker;

pub use aggregator::{StreakSummary, compute_streak, daily_total, daily_totals, day_bounds, local_date};
pub use tracker::{ProgressSnapshot, ProgressTracker};
