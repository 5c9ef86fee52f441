// Prospect research pipeline.
// Search → pain-point analysis → outreach hook, assembled into a ResearchResult.
// All model calls go through llm_client; all web search through search.

pub mod analyzer;
pub mod collector;
pub mod hook;
pub mod models;
pub mod pipeline;
pub mod prompts;

#[cfg(test)]
pub mod testing;
