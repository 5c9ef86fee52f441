mod config;
mod errors;
mod interactive;
mod llm_client;
mod render;
mod research;
mod search;
mod store;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interactive::{BatchSource, Console};
use crate::llm_client::build_language_model;
use crate::research::models::BatchEntry;
use crate::research::pipeline::{BatchOptions, ResearchPipeline, BATCH_DELAY};
use crate::search::TavilyClient;

#[derive(Parser, Debug)]
#[command(
    name = "prospector",
    version,
    about = "Research a prospect company and draft a personalized outreach hook"
)]
struct Cli {
    /// Directory for saved JSON results (overrides PROSPECTOR_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for company names until 'quit' (default)
    Interactive,

    /// Research a single company and print the result
    Research {
        company: String,

        /// Save the result as JSON
        #[arg(long, default_value_t = false)]
        save: bool,

        /// File name for the saved result (implies --save)
        #[arg(long)]
        output: Option<String>,
    },

    /// Research a list of companies with a pause between each
    Batch {
        /// Newline-delimited company list; omit for the interactive menu
        #[arg(long)]
        file: Option<PathBuf>,

        /// Seconds to wait after each successful company
        #[arg(long, default_value_t = BATCH_DELAY.as_secs())]
        delay: u64,

        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Print a previously saved result or batch file
    Show { path: PathBuf },

    /// List Gemini models that support generateContent
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is reserved for results
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Prospector v{}", env!("CARGO_PKG_VERSION"));

    let output_dir = cli.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let command = cli.command.unwrap_or(Command::Interactive);

    match command {
        Command::Models => list_models(&config).await?,
        Command::Show { path } => show_saved(&path)?,
        Command::Interactive => {
            let pipeline = build_pipeline(&config).await?;
            let mut console = Console::new(io::stdin().lock(), io::stdout());
            interactive::run_interactive(&pipeline, &mut console, &output_dir).await?;
        }
        Command::Research {
            company,
            save,
            output,
        } => {
            let pipeline = build_pipeline(&config).await?;
            let result = pipeline.research_prospect(&company).await?;
            println!("{}", render::render_result(&result));
            if save || output.is_some() {
                let path = store::save_result(&output_dir, &result, output.as_deref())?;
                println!("Results saved to: {}", path.display());
            }
        }
        Command::Batch { file, delay, yes } => {
            let pipeline = build_pipeline(&config).await?;
            let options = BatchOptions {
                delay: Duration::from_secs(delay),
                output_dir,
            };
            let mut console = Console::new(io::stdin().lock(), io::stdout());
            interactive::run_batch_menu(
                &pipeline,
                &mut console,
                file.map(BatchSource::File),
                &options,
                yes,
            )
            .await?;
        }
    }

    Ok(())
}

/// Wires the search and language-model clients into a pipeline.
async fn build_pipeline(config: &Config) -> Result<ResearchPipeline> {
    let search = Arc::new(
        TavilyClient::new(config.tavily_api_key.clone())
            .context("failed to build search client")?,
    );
    let llm = build_language_model(config)
        .await
        .context("failed to build LLM client")?;
    Ok(ResearchPipeline::new(search, llm))
}

/// Renders a saved single-result document, or every entry of a batch document.
fn show_saved(path: &Path) -> Result<()> {
    if let Ok(result) = store::load_result(path) {
        println!("{}", render::render_result(&result));
        return Ok(());
    }
    let entries = store::load_batch(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    for entry in &entries {
        match entry {
            BatchEntry::Completed(result) => println!("{}", render::render_result(result)),
            BatchEntry::Failed(failure) => {
                println!("{}: error: {}\n", failure.company_name, failure.error)
            }
        }
    }
    Ok(())
}

async fn list_models(config: &Config) -> Result<()> {
    let models = llm_client::list_models(&config.gemini_api_key)
        .await
        .context("failed to list Gemini models")?;

    println!("Available Gemini models:");
    println!("{}", "=".repeat(60));
    for model in models.iter().filter(|m| m.supports_generate_content()) {
        match &model.display_name {
            Some(display) => println!("✓ {} ({display})", model.name),
            None => println!("✓ {}", model.name),
        }
    }
    Ok(())
}
