//! Gemini `generateContent` clients for both API surfaces.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{LanguageModel, LlmError};

const CURRENT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const LEGACY_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn user_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, or `None` if there is no text.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// One entry of the `models.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Clients
// ────────────────────────────────────────────────────────────────────────────

/// Client for the current (`v1beta`) Generative Language API.
/// The key travels in the `x-goog-api-key` header.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{CURRENT_API_BASE}/{}:generateContent",
            model_path(&self.model)
        );
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await?;
        read_completion(response).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Client for the older `v1` surface, which takes the key as a query parameter.
pub struct LegacyGeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LegacyGeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LanguageModel for LegacyGeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{LEGACY_API_BASE}/{}:generateContent",
            model_path(&self.model)
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await?;
        read_completion(response).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Lists the models visible to `api_key` on the current API.
pub async fn list_models(api_key: &str) -> Result<Vec<ModelInfo>, LlmError> {
    let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
    let response = client
        .get(format!("{CURRENT_API_BASE}/models"))
        .query(&[("pageSize", "1000")])
        .header("x-goog-api-key", api_key)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(api_error(status.as_u16(), body));
    }
    let parsed: ListModelsResponse = serde_json::from_str(&body)?;
    Ok(parsed.models)
}

/// `gemini-x` → `models/gemini-x`; already-qualified names pass through.
pub(crate) fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

async fn read_completion(response: Response) -> Result<String, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("LLM API returned {}: {}", status, body);
        return Err(api_error(status.as_u16(), body));
    }

    parse_completion(&body)
}

fn parse_completion(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;

    if let Some(usage) = &parsed.usage_metadata {
        debug!(
            "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }
    if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
        debug!("LLM finish reason: {reason}");
    }

    parsed.text().ok_or(LlmError::EmptyContent)
}

fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_prefixes_bare_names() {
        assert_eq!(model_path("gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(
            model_path("models/gemini-2.5-flash"),
            "models/gemini-2.5-flash"
        );
    }

    #[test]
    fn test_request_serializes_single_user_turn() {
        let request = GenerateContentRequest::user_prompt("Hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })
        );
    }

    #[test]
    fn test_parse_completion_joins_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Pain Point 1: "}, {"text": "manual CRM work"}]}, "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 30}
        }"#;
        assert_eq!(
            parse_completion(body).unwrap(),
            "Pain Point 1: manual CRM work"
        );
    }

    #[test]
    fn test_parse_completion_without_candidates_is_empty_content() {
        let body = r#"{"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(
            parse_completion(body),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_parse_completion_rejects_invalid_json() {
        assert!(matches!(parse_completion("not json"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_api_error_extracts_message_from_envelope() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        match api_error(400, body.to_string()) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_unparseable() {
        match api_error(502, "Bad Gateway".to_string()) {
            LlmError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_model_list_deserializes() {
        let body = r#"{"models": [
            {"name": "models/gemini-2.5-flash", "displayName": "Gemini 2.5 Flash",
             "supportedGenerationMethods": ["generateContent", "countTokens"]},
            {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
        ]}"#;
        let parsed: ListModelsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.models.len(), 2);
        assert!(parsed.models[0].supports_generate_content());
        assert!(!parsed.models[1].supports_generate_content());
        assert_eq!(
            parsed.models[0].display_name.as_deref(),
            Some("Gemini 2.5 Flash")
        );
    }
}
