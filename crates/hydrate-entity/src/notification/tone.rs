//! Reminder tone enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hydrate_core::error::AppError;

/// Voice used when composing reminder text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Warm and encouraging. Also the fallback tone.
    #[default]
    Friendly,
    /// Energetic, coach-like.
    Motivational,
    /// Light-hearted, with puns.
    Funny,
    /// Soft and unhurried.
    Calm,
    /// Short and direct.
    Strict,
}

impl Tone {
    /// Return the tone as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Motivational => "motivational",
            Self::Funny => "funny",
            Self::Calm => "calm",
            Self::Strict => "strict",
        }
    }

    /// Style guidance handed to the text generator.
    pub fn style_hint(&self) -> &'static str {
        match self {
            Self::Friendly => "warm, friendly and encouraging, like a supportive friend",
            Self::Motivational => "energetic and motivational, like an upbeat coach",
            Self::Funny => "playful and witty, a light pun is welcome",
            Self::Calm => "calm, gentle and soothing",
            Self::Strict => "short, direct and no-nonsense",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friendly" => Ok(Self::Friendly),
            "motivational" => Ok(Self::Motivational),
            "funny" => Ok(Self::Funny),
            "calm" => Ok(Self::Calm),
            "strict" => Ok(Self::Strict),
            other => Err(AppError::validation(format!("Unknown tone: '{other}'"))),
        }
    }
}
