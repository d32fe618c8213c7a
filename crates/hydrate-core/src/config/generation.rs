//! External text generation configuration.

use serde::{Deserialize, Serialize};

/// Settings for the reminder text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Whether to call the generator at all. When `false` every message
    /// comes from the fallback table.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API key for the generation service.
    #[serde(default)]
    pub api_key: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound on a single generation call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl GenerationConfig {
    /// Whether a generator client can be built.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    8
}

fn default_temperature() -> f32 {
    0.9
}
