// ABOUTME: Google Gemini generateContent client
// ABOUTME: Builds requests with generation config and safety settings, classifies failures

use std::str::FromStr;
use std::time::Duration;

use archiai_config::Settings;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::service::{
    AIResponse, AIServiceError, AIServiceResult, GenerationClient, GenerationRequest, Usage,
};

pub const JSON_MIME_TYPE: &str = "application/json";

/// Finish/block reasons that mean the provider's safety filter intervened
const SAFETY_REASONS: &[&str] = &[
    "SAFETY",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "IMAGE_SAFETY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

impl FromStr for SafetyThreshold {
    type Err = AIServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BLOCK_NONE" => Ok(Self::BlockNone),
            "BLOCK_ONLY_HIGH" => Ok(Self::BlockOnlyHigh),
            "BLOCK_MEDIUM_AND_ABOVE" => Ok(Self::BlockMediumAndAbove),
            "BLOCK_LOW_AND_ABOVE" => Ok(Self::BlockLowAndAbove),
            other => Err(AIServiceError::Configuration(format!(
                "Unknown safety threshold: {}",
                other
            ))),
        }
    }
}

/// Everything the client needs besides the prompt
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
    pub safety_threshold: SafetyThreshold,
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl GenerationSettings {
    pub fn from_config(settings: &Settings) -> AIServiceResult<Self> {
        Ok(Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            response_mime_type: JSON_MIME_TYPE.to_string(),
            safety_threshold: settings.safety_threshold.parse()?,
            base_url: settings.api_base_url.clone(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: HarmCategory,
    threshold: SafetyThreshold,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini client holding the API key and generation configuration
pub struct GeminiClient {
    client: Client,
    settings: GenerationSettings,
}

impl GeminiClient {
    /// Create HTTP client with timeout configuration
    fn create_client(settings: &GenerationSettings) -> AIServiceResult<Client> {
        Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|e| AIServiceError::Configuration(format!("Failed to build HTTP client: {}", e)))
    }

    pub fn new(settings: GenerationSettings) -> AIServiceResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AIServiceError::NoApiKey);
        }

        if settings.model.trim().is_empty() {
            return Err(AIServiceError::Configuration("Model name is empty".to_string()));
        }

        Ok(Self {
            client: Self::create_client(&settings)?,
            settings,
        })
    }

    pub fn from_settings(settings: &Settings) -> AIServiceResult<Self> {
        Self::new(GenerationSettings::from_config(settings)?)
    }

    /// Get the model being used by this client
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_body(&self, request: GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
                response_mime_type: self.settings.response_mime_type.clone(),
                response_schema: request.response_schema,
            },
            safety_settings: HarmCategory::ALL
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: self.settings.safety_threshold,
                })
                .collect(),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> AIServiceError {
        if e.is_timeout() {
            let secs = self.settings.request_timeout.as_secs();
            error!("Gemini API request timed out after {} seconds", secs);
            AIServiceError::Timeout(secs)
        } else if e.is_connect() {
            error!("Failed to connect to Gemini API: {}", e);
            AIServiceError::ConnectionFailed(e.to_string())
        } else {
            error!("Gemini API request failed: {}", e);
            AIServiceError::RequestFailed(e)
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> AIServiceResult<AIResponse<String>> {
        let body = self.build_body(request);

        info!(
            "Making Gemini API request: model={}, max_output_tokens={}, timeout={}s",
            self.settings.model,
            self.settings.max_output_tokens,
            self.settings.request_timeout.as_secs()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        info!("Received response from Gemini API: status={}", status);

        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(classify_error_body(status.as_u16(), &text));
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            error!(
                "Failed to decode Gemini response envelope: {}. Body snippet: {}",
                e,
                snippet(&text, 500)
            );
            AIServiceError::ParseError(e.to_string())
        })?;

        let (data, usage) = extract_text(envelope)?;

        info!(
            "Gemini API usage: input_tokens={}, output_tokens={}",
            usage.input_tokens, usage.output_tokens
        );

        Ok(AIResponse { data, usage })
    }
}

fn classify_error_body(status: u16, body: &str) -> AIServiceError {
    let (message, provider_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (snippet(body, 500).to_string(), None),
    };

    error!(
        "Gemini API error: {} {} - {}",
        status,
        provider_status.as_deref().unwrap_or(""),
        message
    );

    if message.to_uppercase().contains("SAFETY") {
        return AIServiceError::SafetyBlocked(message);
    }

    AIServiceError::ApiError { status, message }
}

fn extract_text(response: GenerateContentResponse) -> AIServiceResult<(String, Usage)> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        warn!("Gemini blocked the prompt: {}", reason);
        return Err(AIServiceError::SafetyBlocked(reason.to_string()));
    }

    let usage = response
        .usage_metadata
        .map(|u| Usage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        })
        .unwrap_or_default();

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AIServiceError::InvalidResponse("response has no candidates".to_string()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if SAFETY_REASONS.contains(&reason) {
            warn!("Gemini stopped generation for safety reason: {}", reason);
            return Err(AIServiceError::SafetyBlocked(reason.to_string()));
        }
        if reason == "MAX_TOKENS" {
            warn!("Gemini output hit the max_output_tokens limit; the JSON is probably truncated");
        }
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AIServiceError::InvalidResponse(
            "candidate contains no text".to_string(),
        ));
    }

    Ok((text, usage))
}

fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
