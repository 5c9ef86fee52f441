use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::search::SearchError;

/// Application-level error type.
///
/// Any variant aborts the current company's run. Batch mode downgrades it to an
/// error placeholder; the interactive loop reports it and re-prompts.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Company list not found: {}", .0.display())]
    CompanyListNotFound(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_message_is_preserved() {
        let err: AppError = LlmError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "LLM error: API error (status 429): quota exceeded"
        );
    }

    #[test]
    fn test_missing_company_list_names_the_path() {
        let err = AppError::CompanyListNotFound(PathBuf::from("companies.txt"));
        assert_eq!(err.to_string(), "Company list not found: companies.txt");
    }
}
