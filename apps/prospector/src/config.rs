use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Default model for the current Generative Language API.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Default model for the legacy `v1` surface.
pub const DEFAULT_LEGACY_MODEL: &str = "gemini-1.5-flash-latest";

/// Which Gemini API surface to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmBackend {
    /// Probe the current API at startup, fall back to legacy.
    #[default]
    Auto,
    Current,
    Legacy,
}

impl FromStr for LlmBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(LlmBackend::Auto),
            "current" => Ok(LlmBackend::Current),
            "legacy" => Ok(LlmBackend::Legacy),
            other => bail!("LLM_BACKEND must be one of auto, current, legacy (got '{other}')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once in `main` and handed to each collaborator's constructor.
#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub legacy_model: String,
    pub llm_backend: LlmBackend,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            tavily_api_key: require_env("TAVILY_API_KEY")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            legacy_model: optional_env("GEMINI_LEGACY_MODEL", DEFAULT_LEGACY_MODEL),
            llm_backend: optional_env("LLM_BACKEND", "auto")
                .parse()
                .context("LLM_BACKEND is invalid")?,
            output_dir: PathBuf::from(optional_env("PROSPECTOR_OUTPUT_DIR", ".")),
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
