//! Hook Generator: turns the analysis narrative into a 3-sentence opener.
//!
//! The three-sentence shape is a prompt instruction only. Output that does not
//! look like three sentences is logged and returned unchanged.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::prompts::SELLER_NAME;
use crate::llm_client::{LanguageModel, LlmError};
use crate::research::models::Analysis;
use crate::research::prompts::{HOOK_CONTEXT_TEMPLATE, HOOK_SYSTEM_TEMPLATE};

const EXPECTED_SENTENCES: usize = 3;

pub struct HookGenerator {
    llm: Arc<dyn LanguageModel>,
}

impl HookGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn generate(&self, analysis: &Analysis) -> Result<String, LlmError> {
        info!("Generating email hook for {}", analysis.company_name);

        let prompt = build_hook_prompt(analysis);
        let hook = self.llm.complete(&prompt).await?.trim().to_string();

        let sentences = count_sentences(&hook);
        if sentences != EXPECTED_SENTENCES {
            warn!(
                "Email hook for {} has {} sentences (expected {})",
                analysis.company_name, sentences, EXPECTED_SENTENCES
            );
        }

        info!("Email hook generated");
        Ok(hook)
    }
}

pub fn build_hook_prompt(analysis: &Analysis) -> String {
    let system = HOOK_SYSTEM_TEMPLATE.replace("{seller}", SELLER_NAME);
    let context = HOOK_CONTEXT_TEMPLATE
        .replace("{company}", &analysis.company_name)
        .replace("{analysis}", &analysis.narrative);
    format!("{system}\n\n{context}")
}

/// Rough sentence count: runs of `.`, `!` or `?` followed by whitespace or end of text.
/// Decimal points like `$1.5M` do not count.
pub fn count_sentences(text: &str) -> usize {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?' | '"' | '\'' | ')') {
                i += 1;
            }
            if i + 1 == chars.len() || chars[i + 1].is_whitespace() {
                count += 1;
            }
        }
        i += 1;
    }
    if count == 0 && !chars.is_empty() {
        1
    } else {
        count
    }
}
