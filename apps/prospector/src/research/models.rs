//! Records that flow through the research pipeline.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Max snippets per category embedded in a prompt.
pub const MAX_SNIPPETS_PER_CATEGORY: usize = 5;
/// Max characters per embedded snippet.
pub const MAX_SNIPPET_CHARS: usize = 500;
/// Max characters of content kept in a source citation (before the ellipsis).
pub const MAX_SOURCE_SNIPPET_CHARS: usize = 200;

/// A citation carried from search through to the final record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Everything the collector learned about one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchBundle {
    pub company_name: String,
    pub news: Vec<String>,
    pub about: Vec<String>,
    pub tech: Vec<String>,
    pub sources: Vec<SourceRecord>,
}

/// Free-text pain-point narrative from the analysis model. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub company_name: String,
    pub narrative: String,
    pub sources: Vec<SourceRecord>,
}

/// The terminal record of one pipeline run. Field names are the persisted JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub company_name: String,
    pub timestamp: DateTime<Local>,
    pub pain_points: String,
    pub email_hook: String,
    pub sources: Vec<SourceRecord>,
}

/// Placeholder recorded in a batch when a company's run failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchFailure {
    pub company_name: String,
    pub error: String,
    pub timestamp: DateTime<Local>,
}

/// One element of a batch document: a full record or an error placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Completed(ResearchResult),
    Failed(ResearchFailure),
}

impl BatchEntry {
    pub fn company_name(&self) -> &str {
        match self {
            BatchEntry::Completed(r) => &r.company_name,
            BatchEntry::Failed(f) => &f.company_name,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BatchEntry::Failed(_))
    }
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ResearchResult {
        ResearchResult {
            company_name: "Notion".to_string(),
            timestamp: Local::now(),
            pain_points: "Pain Point 1: onboarding enterprise customers".to_string(),
            email_hook: "Saw the AI launch. Support load follows. Happy to share.".to_string(),
            sources: vec![SourceRecord {
                title: "Notion AI".to_string(),
                url: "https://notion.so/ai".to_string(),
                snippet: "Notion launches AI...".to_string(),
            }],
        }
    }

    #[test]
    fn test_result_serializes_with_persisted_field_names() {
        let value = serde_json::to_value(sample_result()).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["company_name", "timestamp", "pain_points", "email_hook", "sources"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 5);
        assert_eq!(
            value["sources"][0],
            serde_json::json!({
                "title": "Notion AI",
                "url": "https://notion.so/ai",
                "snippet": "Notion launches AI..."
            })
        );
    }

    #[test]
    fn test_batch_entry_failure_shape() {
        let entry = BatchEntry::Failed(ResearchFailure {
            company_name: "Acme".to_string(),
            error: "Search error: HTTP error".to_string(),
            timestamp: Local::now(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(value["company_name"], "Acme");
        assert_eq!(value["error"], "Search error: HTTP error");
    }

    #[test]
    fn test_batch_entry_untagged_deserialization_picks_variant() {
        let completed = serde_json::to_string(&BatchEntry::Completed(sample_result())).unwrap();
        let failed = r#"{"company_name": "Acme", "error": "boom", "timestamp": "2025-01-02T03:04:05+00:00"}"#;

        let a: BatchEntry = serde_json::from_str(&completed).unwrap();
        let b: BatchEntry = serde_json::from_str(failed).unwrap();

        assert!(!a.is_error());
        assert!(b.is_error());
        assert_eq!(a.company_name(), "Notion");
        assert_eq!(b.company_name(), "Acme");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("", 3), "");
    }
}
