//! Reminder cadence configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Reminder behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Default interval lists per frequency tier.
    #[serde(default)]
    pub tiers: TierIntervals,
    /// How many days of history feed the streak computation.
    #[serde(default = "default_streak_history_days")]
    pub streak_history_days: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            tiers: TierIntervals::default(),
            streak_history_days: default_streak_history_days(),
        }
    }
}

/// Ascending reminder intervals, in minutes, for each frequency tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierIntervals {
    /// Intervals for the `minimal` tier.
    #[serde(default = "default_minimal")]
    pub minimal: Vec<i64>,
    /// Intervals for the `moderate` tier.
    #[serde(default = "default_moderate")]
    pub moderate: Vec<i64>,
    /// Intervals for the `frequent` tier.
    #[serde(default = "default_frequent")]
    pub frequent: Vec<i64>,
}

impl TierIntervals {
    /// Every list must be non-empty, positive, and sorted ascending.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, list) in [
            ("minimal", &self.minimal),
            ("moderate", &self.moderate),
            ("frequent", &self.frequent),
        ] {
            if list.is_empty() {
                return Err(AppError::configuration(format!(
                    "reminder.tiers.{name} must list at least one interval"
                )));
            }
            if list.iter().any(|m| *m <= 0) {
                return Err(AppError::configuration(format!(
                    "reminder.tiers.{name} intervals must be positive"
                )));
            }
            if list.windows(2).any(|w| w[0] > w[1]) {
                return Err(AppError::configuration(format!(
                    "reminder.tiers.{name} intervals must be ascending"
                )));
            }
        }
        Ok(())
    }
}

impl Default for TierIntervals {
    fn default() -> Self {
        Self {
            minimal: default_minimal(),
            moderate: default_moderate(),
            frequent: default_frequent(),
        }
    }
}

fn default_streak_history_days() -> i64 {
    90
}

fn default_minimal() -> Vec<i64> {
    vec![180, 240, 360, 480]
}

fn default_moderate() -> Vec<i64> {
    vec![120, 180, 240, 360]
}

fn default_frequent() -> Vec<i64> {
    vec![60, 90, 120, 180]
}
