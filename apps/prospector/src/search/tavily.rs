use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SearchDepth, SearchError, SearchHit, SearchProvider, SearchRequest};

const TAVILY_API_URL: &str = "https://api.tavily.com/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
    response_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TavilyError {
    detail: TavilyErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TavilyErrorDetail {
    Message { error: String },
    Text(String),
}

/// Tavily search API client.
pub struct TavilyClient {
    client: Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, SearchError> {
        let body = TavilySearchRequest {
            api_key: &self.api_key,
            query: &request.query,
            search_depth: request.depth,
            max_results: request.max_results,
        };

        let response = self.client.post(TAVILY_API_URL).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Search API returned {}: {}", status, text);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: error_message(text),
            });
        }

        let parsed: TavilySearchResponse = serde_json::from_str(&text)?;
        debug!(
            "Search '{}' returned {} results in {:?}s",
            request.query,
            parsed.results.len(),
            parsed.response_time
        );
        Ok(parsed.results)
    }
}

fn error_message(body: String) -> String {
    match serde_json::from_str::<TavilyError>(&body) {
        Ok(TavilyError {
            detail: TavilyErrorDetail::Message { error },
        }) => error,
        Ok(TavilyError {
            detail: TavilyErrorDetail::Text(text),
        }) => text,
        Err(_) => body,
    }
}
