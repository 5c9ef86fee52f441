//! Pipeline Orchestrator: search → analysis → hook, per company.
//!
//! Flow: SearchCollector::collect → PainPointAnalyzer::analyze →
//!       HookGenerator::generate → ResearchResult.
//!
//! Any stage error aborts that company's run; nothing partial is kept.
//! Batch mode isolates failures per company and throttles between successes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::research::analyzer::PainPointAnalyzer;
use crate::research::collector::SearchCollector;
use crate::research::hook::HookGenerator;
use crate::research::models::{BatchEntry, ResearchFailure, ResearchResult};
use crate::search::SearchProvider;
use crate::store;

/// Pause after each successful company so the providers' rate limits hold.
pub const BATCH_DELAY: Duration = Duration::from_secs(5);

pub struct ResearchPipeline {
    collector: SearchCollector,
    analyzer: PainPointAnalyzer,
    hook_generator: HookGenerator,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub delay: Duration,
    pub output_dir: PathBuf,
}

/// Everything a finished batch produced.
#[derive(Debug)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
    pub batch_file: PathBuf,
}

impl BatchOutcome {
    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_error()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }
}

impl ResearchPipeline {
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            collector: SearchCollector::new(search),
            analyzer: PainPointAnalyzer::new(llm.clone()),
            hook_generator: HookGenerator::new(llm),
        }
    }

    /// Runs the three stages for one company.
    pub async fn research_prospect(&self, company_name: &str) -> Result<ResearchResult, AppError> {
        if company_name.trim().is_empty() {
            return Err(AppError::Validation("company name must not be empty".to_string()));
        }

        // Step 1: Web research
        let bundle = self.collector.collect(company_name).await?;

        // Step 2: Pain point analysis
        let analysis = self.analyzer.analyze(&bundle).await?;

        // Step 3: Email hook
        let email_hook = self.hook_generator.generate(&analysis).await?;

        Ok(ResearchResult {
            company_name: company_name.to_string(),
            timestamp: Local::now(),
            pain_points: analysis.narrative,
            email_hook,
            sources: bundle.sources,
        })
    }

    /// Researches every company in order, never aborting on a single failure.
    ///
    /// Each success is saved on its own and followed by `options.delay` unless it
    /// is the last company. The combined array is saved at the end.
    pub async fn run_batch(
        &self,
        companies: &[String],
        options: &BatchOptions,
    ) -> Result<BatchOutcome, AppError> {
        let total = companies.len();
        let mut entries = Vec::with_capacity(total);

        info!(
            "Starting batch research for {} companies (delay {}s)",
            total,
            options.delay.as_secs()
        );

        for (i, company) in companies.iter().enumerate() {
            let position = i + 1;
            info!("[{position}/{total}] Researching: {company}");

            match self.research_prospect(company).await {
                Ok(result) => {
                    info!("Complete - found {} sources", result.sources.len());

                    if let Err(e) = store::save_result(&options.output_dir, &result, None) {
                        warn!("Could not save result for {company}: {e}");
                    }
                    entries.push(BatchEntry::Completed(result));

                    if position < total && !options.delay.is_zero() {
                        info!(
                            "Waiting {} seconds before next research...",
                            options.delay.as_secs()
                        );
                        tokio::time::sleep(options.delay).await;
                    }
                }
                Err(e) => {
                    error!("Error researching {company}: {e}");
                    entries.push(BatchEntry::Failed(ResearchFailure {
                        company_name: company.clone(),
                        error: e.to_string(),
                        timestamp: Local::now(),
                    }));
                }
            }
        }

        let batch_file = store::save_batch(&options.output_dir, &entries)?;
        let outcome = BatchOutcome {
            entries,
            batch_file,
        };
        info!(
            "Batch complete: {} succeeded, {} failed",
            outcome.completed(),
            outcome.failed()
        );
        Ok(outcome)
    }
}
