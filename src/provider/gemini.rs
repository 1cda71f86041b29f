//! Google Gemini provider
//!
//! Uses the `generateContent` endpoint in JSON response mode with a response
//! schema per stage, then validates the decoded value against the result
//! contract before handing it to the controller.

use super::prompts;
use super::{AnalysisProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::{AnalysisResult, AnalyzeRequest, ArticleSettings, GeneratedArticle};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

/// Live provider backed by the Gemini API
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    /// `NotConfigured` if no API key is set, `Network` if the HTTP client
    /// cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(
                    "set GEMINI_API_KEY or [provider].api_key".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initialized Gemini provider: {} (model: {})",
            config.api_base, config.model
        );

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: String, schema: serde_json::Value) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
                response_schema: schema,
            },
        }
    }

    /// Send one prompt and decode the JSON reply into `T`
    async fn send<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let body = self.build_request(prompt, schema);

        debug!("Sending request to Gemini: {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        decode_reply(&text)
    }
}

/// Decode a raw `generateContent` body into the payload type
fn decode_reply<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Gemini usage - prompt: {:?} tokens, response: {:?} tokens",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::Parse(format!(
            "empty candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    serde_json::from_str(prompts::extract_json(&text))
        .map_err(|e| ProviderError::Parse(e.to_string()))
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ProviderError> {
        let mut result: AnalysisResult = self
            .send(
                prompts::analysis_prompt(request),
                prompts::analysis_schema(),
            )
            .await?;

        // Session keys off the keyword exactly as typed
        result.keyword = request.keyword.clone();
        result.validate()?;
        Ok(result)
    }

    async fn generate(
        &self,
        analysis: &AnalysisResult,
        settings: &ArticleSettings,
        topic: Option<&str>,
    ) -> Result<GeneratedArticle, ProviderError> {
        let article: GeneratedArticle = self
            .send(
                prompts::generation_prompt(analysis, settings, topic),
                prompts::article_schema(),
            )
            .await?;
        article.validate()?;
        Ok(article)
    }
}
