//! Gemini `generateContent` text generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hydrate_core::config::GenerationConfig;
use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_core::traits::transport::TextGenerator;
use hydrate_core::types::message::GenerationRequest;

use crate::error::TransportError;
use crate::{build_client, status_error};

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates?.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Text generator backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiTextGenerator {
    /// Build the generator, or `None` when generation is disabled or has
    /// no API key.
    pub fn from_config(config: &GenerationConfig) -> AppResult<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        Ok(Some(Self {
            client: build_client(config.timeout_seconds)?,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key.clone(),
        }))
    }

    fn request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
        // Roughly four characters per token, with headroom.
        let max_output_tokens = u32::try_from(request.max_output_length / 2)
            .unwrap_or(u32::MAX)
            .max(16);
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiTextPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens,
            },
        }
    }

    async fn try_generate(&self, request: &GenerationRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let parsed: GeminiResponse = response.json().await?;
        Ok(parsed.into_text().unwrap_or_default())
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        self.try_generate(request).await.map_err(AppError::from)
    }
}
