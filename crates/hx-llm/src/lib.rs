//! Gemini API integration for training-plan generation.
//!
//! Provides:
//! - A `generateContent` client with explicit per-call settings
//! - Classification of API failures (quota, auth, unknown model)
//! - Cleanup of model output wrapped in markdown fences

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Prompt used to check that a model answers at all.
pub const PROBE_PROMPT: &str = "Say 'Hello, this model works!' in one sentence.";
const PROBE_MAX_OUTPUT_TOKENS: u32 = 100;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Quota or rate limit exhausted.
    #[error("API quota exceeded: {message}")]
    RateLimited { message: String },
    /// The key was rejected by the API.
    #[error("API key rejected: {message}")]
    Unauthorized { message: String },
    /// The requested model does not exist or is not enabled for this key.
    #[error("model {model} is not available: {message}")]
    ModelUnavailable { model: String, message: String },
    /// Any other API error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether trying a different model could succeed.
    pub const fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }
}

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub api_base: String,
    pub temperature: f32,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: u32,
    /// Text prepended to the prompt, separated by a blank line.
    pub system_instruction: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: 8192,
            system_instruction: None,
        }
    }
}

impl GenerationSettings {
    /// Settings for a short availability probe against `model`.
    pub fn probe(model: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: api_base.into(),
            top_k: None,
            top_p: None,
            max_output_tokens: PROBE_MAX_OUTPUT_TOKENS,
            ..Self::default()
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given API key and the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Same as [`Client::new`].
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = api_key.into();

        if api_key.is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self { http, api_key })
    }

    /// Generates text for `prompt` with the given settings.
    pub async fn generate(
        &self,
        settings: &GenerationSettings,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let text = match &settings.system_instruction {
            Some(system) => format!("{system}\n\n{prompt}"),
            None => prompt.to_string(),
        };
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                top_k: settings.top_k,
                top_p: settings.top_p,
                max_output_tokens: settings.max_output_tokens,
            },
        };

        tracing::info!(
            model = %settings.model,
            prompt_chars = request.contents[0].parts[0].text.len(),
            "requesting generation"
        );
        let response = self
            .http
            .post(settings.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = parse_api_error(&body).unwrap_or(body);
            return Err(classify_api_error(
                status.as_u16(),
                message,
                &settings.model,
            ));
        }

        let payload: GenerateResponse = serde_json::from_str(&body)
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))?;
        extract_text(payload)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn extract_text(payload: GenerateResponse) -> Result<String, LlmError> {
    if let Some(reason) = payload.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::InvalidResponse(format!(
            "prompt blocked: {reason}"
        )));
    }
    let Some(candidate) = payload.candidates.into_iter().next() else {
        return Err(LlmError::InvalidResponse("no candidates".to_string()));
    };
    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "missing text content (finish reason: {reason})"
        )));
    }
    Ok(text)
}

fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.error.message)
}

/// Maps an error response onto the error taxonomy.
pub fn classify_api_error(status: u16, message: String, model: &str) -> LlmError {
    let lowered = message.to_lowercase();
    if status == 429 || lowered.contains("quota") {
        return LlmError::RateLimited { message };
    }
    if status == 401
        || status == 403
        || lowered.contains("api key")
        || lowered.contains("api_key")
    {
        return LlmError::Unauthorized { message };
    }
    if status == 404 || (lowered.contains("model") && lowered.contains("not found")) {
        return LlmError::ModelUnavailable {
            model: model.to_string(),
            message,
        };
    }
    LlmError::Api { status, message }
}

/// Removes a surrounding markdown code fence such as "```html ... ```".
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string on the opening line.
    body.split_once('\n').map_or(body, |(_, inner)| inner).trim()
}
