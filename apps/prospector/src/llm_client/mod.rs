//! LLM Client: the single point of entry for all language-model calls.
//!
//! The rest of the crate only sees `Arc<dyn LanguageModel>`. Which Gemini API
//! surface backs it is decided once at startup by `build_language_model`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, LlmBackend};

pub mod gemini;
pub mod prompts;

pub use gemini::{list_models, GeminiClient, LegacyGeminiClient, ModelInfo};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-in, text-out completion capability. No streaming, no structured output.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Resolves `LlmBackend::Auto` into a concrete backend by probing the current API.
///
/// The current API wins when it lists the configured model with
/// `generateContent` support. Any probe failure falls back to legacy.
pub async fn detect_backend(config: &Config) -> LlmBackend {
    match config.llm_backend {
        LlmBackend::Current => LlmBackend::Current,
        LlmBackend::Legacy => LlmBackend::Legacy,
        LlmBackend::Auto => match list_models(&config.gemini_api_key).await {
            Ok(models) if supports_generate_content(&models, &config.gemini_model) => {
                LlmBackend::Current
            }
            Ok(_) => {
                warn!(
                    "Model '{}' not offered by the current API, falling back to legacy",
                    config.gemini_model
                );
                LlmBackend::Legacy
            }
            Err(e) => {
                warn!("Current API probe failed ({e}), falling back to legacy");
                LlmBackend::Legacy
            }
        },
    }
}

/// Builds the process-wide language model client.
pub async fn build_language_model(config: &Config) -> Result<Arc<dyn LanguageModel>, LlmError> {
    let model: Arc<dyn LanguageModel> = match detect_backend(config).await {
        LlmBackend::Legacy => Arc::new(LegacyGeminiClient::new(
            config.gemini_api_key.clone(),
            config.legacy_model.clone(),
        )?),
        LlmBackend::Current | LlmBackend::Auto => Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )?),
    };
    info!("LLM client initialized (model: {})", model.model());
    Ok(model)
}

/// True when `model` appears in `models` with `generateContent` support.
/// Accepts both `gemini-x` and `models/gemini-x` spellings.
pub fn supports_generate_content(models: &[ModelInfo], model: &str) -> bool {
    let wanted = gemini::model_path(model);
    models
        .iter()
        .any(|m| m.name == wanted && m.supports_generate_content())
}
