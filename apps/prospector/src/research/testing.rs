//! Provider fakes shared by pipeline and CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LanguageModel, LlmError};
use crate::search::{SearchError, SearchHit, SearchProvider, SearchRequest};

pub const ANALYSIS_REPLY: &str = "Pain Point 1: Notion Mail launch adds support volume\n\
    Pain Point 2: sharded Postgres migration\n\
    Pain Point 3: enterprise onboarding\n\
    Key Hook Insight: they just shipped Mail.";
pub const HOOK_REPLY: &str = "  Saw Notion Mail shipped last month. New surfaces usually flood support queues. \
    Happy to share how we automated triage for a similar team.  ";

/// One hit per category; any company starting with "Broken" fails.
pub struct FixedSearch;

#[async_trait]
impl SearchProvider for FixedSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, SearchError> {
        if request.query.starts_with("Broken") {
            return Err(SearchError::Api {
                status: 432,
                message: "usage limit exceeded".to_string(),
            });
        }
        Ok(vec![SearchHit {
            title: Some(format!("Result for {}", request.query)),
            url: Some("https://example.com".to_string()),
            content: Some(format!("Content about {}", request.query)),
        }])
    }
}

/// Answers analysis prompts and hook prompts differently, recording both.
#[derive(Default)]
pub struct ScriptedModel {
    pub prompts: Mutex<Vec<String>>,
    pub fail_hooks: bool,
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.ends_with("Provide your analysis:") {
            Ok(ANALYSIS_REPLY.to_string())
        } else if self.fail_hooks {
            Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
        } else {
            Ok(HOOK_REPLY.to_string())
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
