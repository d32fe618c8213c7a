//! Notification category enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hydrate_core::error::AppError;

/// Purpose of a reminder. Each category has its own cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// A small sip between tasks.
    Sip,
    /// A full glass of water.
    Glass,
    /// Walk to refill a bottle.
    Walk,
    /// General drink reminder.
    Drink,
    /// Herbal tea break.
    HerbalTea,
    /// Day-split milestone celebration.
    Milestone,
}

impl NotificationCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Sip,
        Self::Glass,
        Self::Walk,
        Self::Drink,
        Self::HerbalTea,
        Self::Milestone,
    ];

    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Glass => "glass",
            Self::Walk => "walk",
            Self::Drink => "drink",
            Self::HerbalTea => "herbal_tea",
            Self::Milestone => "milestone",
        }
    }

    /// Short description of what the reminder asks the user to do.
    pub fn purpose(&self) -> &'static str {
        match self {
            Self::Sip => "take a quick sip of water",
            Self::Glass => "drink a full glass of water",
            Self::Walk => "get up, stretch, and refill their water bottle",
            Self::Drink => "drink some water",
            Self::HerbalTea => "take a break with a cup of herbal tea",
            Self::Milestone => "celebrate reaching a hydration milestone",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sip" => Ok(Self::Sip),
            "glass" => Ok(Self::Glass),
            "walk" => Ok(Self::Walk),
            "drink" => Ok(Self::Drink),
            "herbal_tea" | "herbaltea" | "herbal-tea" => Ok(Self::HerbalTea),
            "milestone" => Ok(Self::Milestone),
            other => Err(AppError::validation(format!(
                "Unknown notification category: '{other}'"
            ))),
        }
    }
}
