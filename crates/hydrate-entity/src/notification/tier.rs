//! Frequency tier enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hydrate_core::config::TierIntervals;
use hydrate_core::error::AppError;

/// Coarse reminder frequency preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyTier {
    /// Fewest reminders.
    Minimal,
    /// Balanced cadence.
    #[default]
    Moderate,
    /// Most reminders.
    Frequent,
}

impl FrequencyTier {
    /// Return the tier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Frequent => "frequent",
        }
    }

    /// The ascending interval list (minutes) configured for this tier.
    pub fn intervals<'a>(&self, tiers: &'a TierIntervals) -> &'a [i64] {
        match self {
            Self::Minimal => &tiers.minimal,
            Self::Moderate => &tiers.moderate,
            Self::Frequent => &tiers.frequent,
        }
    }
}

impl fmt::Display for FrequencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FrequencyTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "moderate" => Ok(Self::Moderate),
            "frequent" => Ok(Self::Frequent),
            other => Err(AppError::validation(format!(
                "Unknown frequency tier: '{other}'"
            ))),
        }
    }
}
