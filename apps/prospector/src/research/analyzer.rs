//! Pain Point Analyzer: one prompt over the research bundle, raw model text back.
//!
//! The narrative is handed on verbatim. No parsing, no format checks.

use std::sync::Arc;

use tracing::info;

use crate::llm_client::prompts::{INSUFFICIENT_DATA_RULE, SELLER_CAPABILITIES, SELLER_NAME};
use crate::llm_client::{LanguageModel, LlmError};
use crate::research::models::{
    truncate_chars, Analysis, ResearchBundle, MAX_SNIPPETS_PER_CATEGORY, MAX_SNIPPET_CHARS,
};
use crate::research::prompts::{
    ANALYSIS_CONTEXT_TEMPLATE, ANALYSIS_INSTRUCTION, ANALYSIS_SYSTEM_TEMPLATE, NO_DATA_FOUND,
};

pub struct PainPointAnalyzer {
    llm: Arc<dyn LanguageModel>,
}

impl PainPointAnalyzer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn analyze(&self, bundle: &ResearchBundle) -> Result<Analysis, LlmError> {
        info!("Analyzing pain points for {}", bundle.company_name);

        let prompt = build_analysis_prompt(bundle);
        let narrative = self.llm.complete(&prompt).await?;

        info!("Pain point analysis complete");
        Ok(Analysis {
            company_name: bundle.company_name.clone(),
            narrative,
            sources: bundle.sources.clone(),
        })
    }
}

/// Persona and rules, then the research context, then the instruction.
pub fn build_analysis_prompt(bundle: &ResearchBundle) -> String {
    let system = ANALYSIS_SYSTEM_TEMPLATE
        .replace("{seller}", SELLER_NAME)
        .replace("{capabilities}", SELLER_CAPABILITIES)
        .replace("{insufficient_data_rule}", INSUFFICIENT_DATA_RULE);

    let context = ANALYSIS_CONTEXT_TEMPLATE
        .replace("{company}", &bundle.company_name)
        .replace("{news}", &format_list(&bundle.news))
        .replace("{about}", &format_list(&bundle.about))
        .replace("{tech}", &format_list(&bundle.tech));

    format!("{system}\n\n{context}\n\n{ANALYSIS_INSTRUCTION}")
}

/// `- item` lines, capped in count and length; `No data found` when empty.
pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return NO_DATA_FOUND.to_string();
    }
    items
        .iter()
        .take(MAX_SNIPPETS_PER_CATEGORY)
        .map(|item| format!("- {}", truncate_chars(item, MAX_SNIPPET_CHARS)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::research::models::SourceRecord;

    struct RecordingModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    fn bundle() -> ResearchBundle {
        ResearchBundle {
            company_name: "Notion".to_string(),
            news: vec!["Notion launched Notion Mail in 2025".to_string()],
            about: vec![],
            tech: vec!["Runs on Postgres sharded across 480 logical shards".to_string()],
            sources: vec![SourceRecord {
                title: "Notion Mail".to_string(),
                url: "https://notion.so/mail".to_string(),
                snippet: "Notion launched...".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_list_empty_reads_no_data_found() {
        assert_eq!(format_list(&[]), "No data found");
    }

    #[test]
    fn test_format_list_caps_items_and_length() {
        let items: Vec<String> = (0..8).map(|i| format!("{i}{}", "y".repeat(700))).collect();
        let rendered = format_list(&items);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let body = line.strip_prefix("- ").unwrap();
            assert_eq!(body.chars().count(), 500);
        }
    }

    #[test]
    fn test_prompt_contains_rules_and_context() {
        let prompt = build_analysis_prompt(&bundle());

        assert!(prompt.contains("COMPANY: Notion"));
        assert!(prompt.contains("Senior Sales Engineer at IntellColabs"));
        assert!(prompt.contains("Insufficient data"));
        assert!(prompt.contains("Pain Point 3: [Specific issue with evidence]"));
        assert!(prompt.contains("RECENT NEWS & ANNOUNCEMENTS:\n- Notion launched Notion Mail in 2025"));
        assert!(prompt.contains("COMPANY BACKGROUND:\nNo data found\n"));
        assert!(prompt.ends_with("Provide your analysis:"));
        assert!(!prompt.contains('{'), "unreplaced placeholder in prompt");
    }

    #[tokio::test]
    async fn test_analyze_returns_model_text_verbatim() {
        let reply = "  Pain Point 1: mail launch strains support\n".to_string();
        let model = Arc::new(RecordingModel {
            reply: reply.clone(),
            prompts: Mutex::new(Vec::new()),
        });
        let analyzer = PainPointAnalyzer::new(model.clone());

        let analysis = analyzer.analyze(&bundle()).await.unwrap();

        assert_eq!(analysis.narrative, reply);
        assert_eq!(analysis.company_name, "Notion");
        assert_eq!(analysis.sources, bundle().sources);
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }
}
