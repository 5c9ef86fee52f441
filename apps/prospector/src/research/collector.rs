//! Search Collector: three topic-scoped searches flattened into a `ResearchBundle`.
//!
//! Queries run strictly in order: news, about, tech. Sources keep that order and
//! the provider's ranking within each category. Provider errors propagate as-is.

use std::sync::Arc;

use tracing::info;

use crate::research::models::{
    truncate_chars, ResearchBundle, SourceRecord, MAX_SNIPPETS_PER_CATEGORY, MAX_SNIPPET_CHARS,
    MAX_SOURCE_SNIPPET_CHARS,
};
use crate::search::{SearchDepth, SearchError, SearchHit, SearchProvider, SearchRequest};

const NEWS_MAX_RESULTS: u32 = 5;
const ABOUT_MAX_RESULTS: u32 = 3;
const TECH_MAX_RESULTS: u32 = 3;

/// One of the three research topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    News,
    About,
    Tech,
}

impl Topic {
    /// Builds the provider request for `company`.
    pub fn request(self, company: &str) -> SearchRequest {
        match self {
            Topic::News => SearchRequest {
                query: format!("{company} news funding product launch 2024 2025"),
                depth: SearchDepth::Advanced,
                max_results: NEWS_MAX_RESULTS,
            },
            Topic::About => SearchRequest {
                query: format!("{company} about mission technology"),
                depth: SearchDepth::Basic,
                max_results: ABOUT_MAX_RESULTS,
            },
            Topic::Tech => SearchRequest {
                query: format!("{company} technology stack tools software uses"),
                depth: SearchDepth::Basic,
                max_results: TECH_MAX_RESULTS,
            },
        }
    }
}

pub struct SearchCollector {
    provider: Arc<dyn SearchProvider>,
}

impl SearchCollector {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub async fn collect(&self, company: &str) -> Result<ResearchBundle, SearchError> {
        info!("Researching {company}...");

        let news = self.provider.search(&Topic::News.request(company)).await?;
        let about = self.provider.search(&Topic::About.request(company)).await?;
        let tech = self.provider.search(&Topic::Tech.request(company)).await?;

        let sources = extract_sources(&[news.as_slice(), about.as_slice(), tech.as_slice()]);
        info!("Found {} sources for {company}", sources.len());

        Ok(ResearchBundle {
            company_name: company.to_string(),
            news: extract_content(&news),
            about: extract_content(&about),
            tech: extract_content(&tech),
            sources,
        })
    }
}

/// Non-empty content of the first hits, capped in count and length.
pub fn extract_content(hits: &[SearchHit]) -> Vec<String> {
    hits.iter()
        .filter_map(|h| h.content.as_deref())
        .filter(|c| !c.is_empty())
        .take(MAX_SNIPPETS_PER_CATEGORY)
        .map(|c| truncate_chars(c, MAX_SNIPPET_CHARS).to_string())
        .collect()
}

/// One citation per hit across all result sets, in order.
pub fn extract_sources(result_sets: &[&[SearchHit]]) -> Vec<SourceRecord> {
    result_sets
        .iter()
        .flat_map(|set| set.iter())
        .map(|hit| SourceRecord {
            title: hit.title.clone().unwrap_or_else(|| "No title".to_string()),
            url: hit.url.clone().unwrap_or_default(),
            snippet: format!(
                "{}...",
                truncate_chars(
                    hit.content.as_deref().unwrap_or_default(),
                    MAX_SOURCE_SNIPPET_CHARS
                )
            ),
        })
        .collect()
}
