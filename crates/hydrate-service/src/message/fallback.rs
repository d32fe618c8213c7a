//! Static reminder templates used when generation is unavailable.
//!
//! Templates may reference `{current}`, `{goal}`, `{remaining}`,
//! `{percent}`, `{streak}`, and `{label}`.

use hydrate_entity::notification::{NotificationCategory, Tone};

/// Tone whose table is complete and used for any empty slot.
pub const FALLBACK_TONE: Tone = Tone::Friendly;

/// Last-resort body if every table lookup comes back empty.
pub const DEFAULT_BODY: &str = "Time for some water. Take a sip now!";

/// Templates for an exact `(tone, category)` pair. May be empty.
pub fn templates(tone: Tone, category: NotificationCategory) -> &'static [&'static str] {
    use NotificationCategory as C;

    match (tone, category) {
        (Tone::Friendly, C::Sip) => &[
            "Quick sip break? You're at {current} of {goal} ml. Grab your bottle now!",
            "A little sip goes a long way. {remaining} ml to go today, take one now!",
        ],
        (Tone::Friendly, C::Glass) => &[
            "How about a full glass of water? You're {percent}% of the way there. Pour one now!",
            "Glass time! {current} ml down, {remaining} ml to go. Fill up and drink!",
        ],
        (Tone::Friendly, C::Walk) => &[
            "Stretch your legs and refill your bottle. {remaining} ml left today!",
            "Time for a short walk to the water cooler. Go refill now!",
        ],
        (Tone::Friendly, C::Drink) => &[
            "Hydration check! You're at {percent}% of your {goal} ml goal. Drink some water now!",
            "Your body will thank you. {remaining} ml to go, have a drink now!",
        ],
        (Tone::Friendly, C::HerbalTea) => &[
            "Cozy tea break? A cup of herbal tea counts too. Brew one now!",
            "Treat yourself to herbal tea. {remaining} ml to go, put the kettle on!",
        ],
        (Tone::Friendly, C::Milestone) => &[
            "You reached your {label} milestone with {current} ml! Keep it up, take another sip!",
            "Milestone unlocked: {label}. {percent}% done today, keep sipping!",
        ],

        (Tone::Motivational, C::Sip) => &[
            "Every sip counts! {current} ml and climbing. Take one now!",
            "Small wins build big days. Sip now and chase that {goal} ml!",
        ],
        (Tone::Motivational, C::Glass) => &[
            "Crush it! One full glass brings you closer to {goal} ml. Drink up now!",
            "You're {percent}% there. A glass now keeps the momentum going!",
        ],
        (Tone::Motivational, C::Walk) => &[
            "Move and hydrate! Walk, refill, and own the next {remaining} ml!",
            "Champions refill. Take a quick walk and grab water now!",
        ],
        (Tone::Motivational, C::Drink) => &[
            "Fuel up! {remaining} ml stands between you and your goal. Drink now!",
            "{streak}-day streak on the line. Drink up and keep winning!",
        ],
        (Tone::Motivational, C::HerbalTea) => &[
            "Recharge with herbal tea and come back stronger. Brew a cup now!",
        ],
        (Tone::Motivational, C::Milestone) => &[
            "{label} milestone smashed at {current} ml! Keep that energy, drink again soon!",
        ],

        (Tone::Funny, C::Sip) => &[
            "Your water bottle misses you. Give it a sip, it's been {remaining} ml of loneliness.",
            "Sip happens. Make it happen now!",
        ],
        (Tone::Funny, C::Glass) => &[
            "Glass half empty? Fix that. Drink a full one now!",
        ],
        (Tone::Funny, C::Walk) => &[
            "Legs asleep? Wake them up with a trip to the tap. Go now!",
        ],
        (Tone::Funny, C::Drink) => &[
            "Water you waiting for? {remaining} ml to go. Drink now!",
            "Be like a plant: drink water and thrive. {percent}% done, drink up!",
        ],
        (Tone::Funny, C::HerbalTea) => &[
            "Tea-rific idea: a herbal break. Steep one now!",
        ],
        (Tone::Funny, C::Milestone) => &[
            "{label} milestone? Nailed it. You're basically a fish now. Keep swimming, drink more!",
        ],

        (Tone::Calm, C::Sip) => &[
            "Pause for a moment and take a gentle sip of water.",
        ],
        (Tone::Calm, C::Glass) => &[
            "Breathe in, breathe out, and enjoy a slow glass of water now.",
        ],
        (Tone::Calm, C::Walk) => &[
            "A short, easy walk and a fresh refill. Take a moment for yourself now.",
        ],
        (Tone::Calm, C::Drink) => &[
            "You're at {current} ml. Take a calm moment and drink some water.",
        ],
        (Tone::Calm, C::HerbalTea) => &[
            "Slow down with a warm cup of herbal tea. Brew one now.",
        ],
        (Tone::Calm, C::Milestone) => &[
            "You gently reached your {label} milestone. Keep sipping at your own pace.",
        ],

        (Tone::Strict, C::Sip) => &["Sip. Now."],
        (Tone::Strict, C::Glass) => &["{remaining} ml left. Drink a glass now."],
        (Tone::Strict, C::Drink) => &["Behind schedule: {percent}%. Drink water now."],
        (Tone::Strict, C::Walk | C::HerbalTea | C::Milestone) => &[],
    }
}

/// Templates for the pair, falling back to [`FALLBACK_TONE`] when empty.
pub fn templates_or_default(
    tone: Tone,
    category: NotificationCategory,
) -> &'static [&'static str] {
    let exact = templates(tone, category);
    if exact.is_empty() {
        templates(FALLBACK_TONE, category)
    } else {
        exact
    }
}
