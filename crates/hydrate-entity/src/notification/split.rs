//! Day-split milestone targets.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A time-of-day and cumulative volume target within a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySplit {
    /// Local time of day after which the target counts, `"HH:MM"` on the wire.
    #[serde(with = "hhmm")]
    pub time_of_day: NaiveTime,
    /// Cumulative volume for the day, in millilitres.
    pub target_ml: i32,
    /// Display label, e.g. "Morning".
    #[serde(default)]
    pub label: String,
    /// Whether the client should celebrate with confetti.
    #[serde(default)]
    pub confetti_enabled: bool,
}

impl DaySplit {
    /// Build a split.
    pub fn new(time_of_day: NaiveTime, target_ml: i32, label: impl Into<String>) -> Self {
        Self {
            time_of_day,
            target_ml,
            label: label.into(),
            confetti_enabled: false,
        }
    }

    /// The split time formatted as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.time_of_day.format("%H:%M").to_string()
    }
}

/// Serde adapter for `HH:MM` (seconds accepted on input).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Deserialize from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid time of day '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_hhmm() {
        let split: DaySplit = serde_json::from_value(serde_json::json!({
            "time_of_day": "10:00",
            "target_ml": 1000,
            "label": "Morning",
            "confetti_enabled": true
        }))
        .unwrap();
        assert_eq!(split.time_of_day, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert!(split.confetti_enabled);

        let value = serde_json::to_value(&split).unwrap();
        assert_eq!(value["time_of_day"], "10:00");
    }

    #[test]
    fn test_invalid_time_rejected() {
        let result = serde_json::from_value::<DaySplit>(serde_json::json!({
            "time_of_day": "25:99",
            "target_ml": 500
        }));
        assert!(result.is_err());
    }
}
