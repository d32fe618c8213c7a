//! Builds reminder text from the generator, with a static fallback.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hydrate_core::traits::transport::TextGenerator;
use hydrate_core::types::message::GenerationRequest;
use hydrate_entity::notification::{DaySplit, NotificationCategory, Tone};

use super::fallback;

/// Character budget for push notification bodies.
pub const PUSH_BODY_BUDGET: usize = 178;
/// Character budget for SMS bodies.
pub const SMS_BODY_BUDGET: usize = 160;

/// The channel a message is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    /// Push notification.
    Push,
    /// Text message.
    Sms,
}

impl MessageChannel {
    /// Maximum body length in characters.
    pub fn budget(&self) -> usize {
        match self {
            Self::Push => PUSH_BODY_BUDGET,
            Self::Sms => SMS_BODY_BUDGET,
        }
    }
}

/// Where the body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSource {
    /// Returned by the text generator.
    Generated,
    /// Picked from the static table.
    Fallback,
}

/// Progress figures a message may mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageStats {
    /// Volume logged today.
    pub current_ml: i64,
    /// Daily goal.
    pub goal_ml: i64,
    /// Progress percentage.
    pub percent: f64,
    /// Current streak in days.
    pub streak: u32,
}

impl MessageStats {
    /// Volume still needed today, never negative.
    pub fn remaining_ml(&self) -> i64 {
        (self.goal_ml - self.current_ml).max(0)
    }

    /// Percentage rounded for display.
    pub fn percent_label(&self) -> String {
        format!("{:.0}", self.percent.max(0.0))
    }
}

/// A finished reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedMessage {
    /// Notification title.
    pub title: String,
    /// Notification body, within the channel budget.
    pub body: String,
    /// Where the body came from.
    pub source: MessageSource,
}

/// Composes reminder text.
///
/// The generator is optional; without one every message comes from the
/// fallback table. Generation is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    temperature: f32,
}

impl MessageComposer {
    /// Creates a new composer.
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        timeout: Duration,
        temperature: f32,
    ) -> Self {
        Self {
            generator,
            timeout,
            temperature,
        }
    }

    /// A composer that only uses the fallback table.
    pub fn fallback_only() -> Self {
        Self::new(None, Duration::from_secs(1), 0.0)
    }

    /// Compose a reminder. Never fails and never returns an empty body.
    pub async fn compose(
        &self,
        category: NotificationCategory,
        tone: Tone,
        stats: &MessageStats,
        channel: MessageChannel,
        split: Option<&DaySplit>,
    ) -> ComposedMessage {
        let budget = channel.budget();
        let title = title_for(category, split);

        if let Some(body) = self.generate(category, tone, stats, budget, split).await {
            return ComposedMessage {
                title,
                body,
                source: MessageSource::Generated,
            };
        }

        ComposedMessage {
            title,
            body: fallback_body(category, tone, stats, budget, split),
            source: MessageSource::Fallback,
        }
    }

    async fn generate(
        &self,
        category: NotificationCategory,
        tone: Tone,
        stats: &MessageStats,
        budget: usize,
        split: Option<&DaySplit>,
    ) -> Option<String> {
        let generator = self.generator.as_ref()?;
        let request = GenerationRequest {
            prompt: build_prompt(category, tone, stats, budget, split),
            max_output_length: budget,
            temperature: self.temperature,
        };

        match tokio::time::timeout(self.timeout, generator.generate(&request)).await {
            Ok(Ok(text)) => {
                let cleaned = clean_generated(&text, budget);
                if cleaned.is_none() {
                    debug!(category = %category, "Generator returned no usable text");
                }
                cleaned
            }
            Ok(Err(e)) => {
                warn!(category = %category, error = %e, "Text generation failed, using fallback");
                None
            }
            Err(_) => {
                warn!(
                    category = %category,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Text generation timed out, using fallback"
                );
                None
            }
        }
    }
}

/// Render the generation prompt.
pub fn build_prompt(
    category: NotificationCategory,
    tone: Tone,
    stats: &MessageStats,
    budget: usize,
    split: Option<&DaySplit>,
) -> String {
    let mut prompt = format!(
        "Write one hydration reminder notification.\n\
         Tone: {tone} ({hint}).\n\
         Goal of the message: encourage the user to {purpose}.\n\
         Progress today: {current} ml of {goal} ml ({percent}%), {remaining} ml remaining.\n\
         Current streak: {streak} day(s).\n",
        hint = tone.style_hint(),
        purpose = category.purpose(),
        current = stats.current_ml,
        goal = stats.goal_ml,
        percent = stats.percent_label(),
        remaining = stats.remaining_ml(),
        streak = stats.streak,
    );
    if let Some(split) = split {
        let label = if split.label.is_empty() {
            split.time_label()
        } else {
            split.label.clone()
        };
        prompt.push_str(&format!(
            "The user just reached the \"{label}\" milestone of {} ml.\n",
            split.target_ml
        ));
    }
    prompt.push_str(&format!(
        "Rules:\n\
         - At most {budget} characters.\n\
         - End with a clear call to action.\n\
         - No hashtags and no quotation marks.\n\
         - Reply with the message text only.\n"
    ));
    prompt
}

/// Title for a category. Milestone titles name the split.
pub fn title_for(category: NotificationCategory, split: Option<&DaySplit>) -> String {
    match category {
        NotificationCategory::Sip => "Time for a sip".to_string(),
        NotificationCategory::Glass => "Grab a glass".to_string(),
        NotificationCategory::Walk => "Stretch and refill".to_string(),
        NotificationCategory::Drink => "Hydration check".to_string(),
        NotificationCategory::HerbalTea => "Tea time".to_string(),
        NotificationCategory::Milestone => match split.map(|s| s.label.as_str()) {
            Some(label) if !label.is_empty() => format!("Milestone reached: {label}"),
            _ => "Milestone reached!".to_string(),
        },
    }
}

/// Trim, strip wrapping quotes, and fit the budget. `None` if nothing
/// usable is left.
pub fn clean_generated(text: &str, budget: usize) -> Option<String> {
    const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '`'];

    let mut trimmed = text.trim();
    while let Some(inner) = trimmed
        .strip_prefix(QUOTES)
        .and_then(|s| s.strip_suffix(QUOTES))
    {
        trimmed = inner.trim();
    }

    let fitted = truncate_chars(trimmed, budget);
    (!fitted.is_empty()).then_some(fitted)
}

/// Cut to at most `budget` characters, trimming trailing whitespace.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Fill a template's placeholders.
pub fn render(template: &str, stats: &MessageStats, split: Option<&DaySplit>) -> String {
    let label = split
        .map(|s| {
            if s.label.is_empty() {
                s.time_label()
            } else {
                s.label.clone()
            }
        })
        .unwrap_or_else(|| "daily".to_string());

    template
        .replace("{current}", &stats.current_ml.to_string())
        .replace("{goal}", &stats.goal_ml.to_string())
        .replace("{remaining}", &stats.remaining_ml().to_string())
        .replace("{percent}", &stats.percent_label())
        .replace("{streak}", &stats.streak.to_string())
        .replace("{label}", &label)
}

fn fallback_body(
    category: NotificationCategory,
    tone: Tone,
    stats: &MessageStats,
    budget: usize,
    split: Option<&DaySplit>,
) -> String {
    let table = fallback::templates_or_default(tone, category);
    let rendered = if table.is_empty() {
        fallback::DEFAULT_BODY.to_string()
    } else {
        render(table[rand::random_range(0..table.len())], stats, split)
    };

    let fitted = truncate_chars(&rendered, budget);
    if fitted.is_empty() {
        truncate_chars(fallback::DEFAULT_BODY, budget)
    } else {
        fitted
    }
}
