//! Interactive terminal surface: the research prompt loop and the batch menu.
//!
//! All I/O goes through `Console`, which is generic over its reader and writer.

use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::error;

use crate::errors::AppError;
use crate::render;
use crate::research::pipeline::{BatchOptions, ResearchPipeline};
use crate::store;

/// Default company list read by batch option 2.
pub const DEFAULT_COMPANY_LIST: &str = "companies.txt";

const EXIT_KEYWORDS: [&str; 3] = ["quit", "exit", "q"];

pub fn is_exit_keyword(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&input.as_str())
}

/// Company names from a newline-delimited file, blank lines skipped.
pub fn load_companies_from_file(path: &Path) -> Result<Vec<String>, AppError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::CompanyListNotFound(path.to_path_buf()),
        _ => AppError::Io(e),
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Where batch mode takes its companies from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSource {
    Manual,
    File(PathBuf),
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints `prompt` and reads one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// `y` / `yes` (any case) is a yes; anything else, including end of input, is a no.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{prompt} (y/n): "))?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    /// Reads company names until an empty line or end of input.
    pub fn read_company_list(&mut self) -> io::Result<Vec<String>> {
        self.say("Enter company names (one per line, empty line to finish):")?;
        let mut companies = Vec::new();
        while let Some(line) = self.ask("> ")? {
            if line.is_empty() {
                break;
            }
            companies.push(line);
        }
        Ok(companies)
    }

    pub fn choose_batch_source(&mut self) -> io::Result<BatchSource> {
        self.say("\nOptions:")?;
        self.say("1. Enter companies manually")?;
        self.say(&format!("2. Load from file ({DEFAULT_COMPANY_LIST})"))?;
        let choice = self.ask("\nChoice (1 or 2): ")?;
        Ok(match choice.as_deref() {
            Some("2") => BatchSource::File(PathBuf::from(DEFAULT_COMPANY_LIST)),
            _ => BatchSource::Manual,
        })
    }
}

/// The research prompt loop. Errors for one company are reported and the loop
/// goes on; only console I/O errors end it early.
pub async fn run_interactive<R: BufRead, W: Write>(
    pipeline: &ResearchPipeline,
    console: &mut Console<R, W>,
    output_dir: &Path,
) -> io::Result<()> {
    console.say("\nWelcome to the Prospector sales researcher!")?;
    console.say("Enter a company name to research (or 'quit' to exit)\n")?;

    loop {
        let Some(company) = console.ask("Company name: ")? else {
            break;
        };

        if is_exit_keyword(&company) {
            console.say("\nThanks for using Prospector!")?;
            break;
        }
        if company.is_empty() {
            console.say("Please enter a valid company name")?;
            continue;
        }

        match pipeline.research_prospect(&company).await {
            Ok(result) => {
                console.say(&render::render_result(&result))?;
                if console.confirm("\nSave results to file?")? {
                    match store::save_result(output_dir, &result, None) {
                        Ok(path) => console.say(&format!("\nResults saved to: {}", path.display()))?,
                        Err(e) => console.say(&format!("\nCould not save results: {e}"))?,
                    }
                }
                console.say(&"-".repeat(60))?;
            }
            Err(e) => {
                error!("Research for {company} failed: {e}");
                console.say(&format!("\nError: {e}"))?;
                console.say("Please try again with a different company name")?;
            }
        }
    }
    Ok(())
}

/// Batch menu: pick the company source, confirm, run, summarise.
///
/// `source` skips the menu when already known (e.g. from a CLI flag);
/// `assume_yes` skips the confirmation.
pub async fn run_batch_menu<R: BufRead, W: Write>(
    pipeline: &ResearchPipeline,
    console: &mut Console<R, W>,
    source: Option<BatchSource>,
    options: &BatchOptions,
    assume_yes: bool,
) -> Result<(), AppError> {
    console.say("\nProspector - Batch Mode")?;
    console.say(&"=".repeat(60))?;

    let source = match source {
        Some(source) => source,
        None => console.choose_batch_source()?,
    };

    let companies = match source {
        BatchSource::File(path) => match load_companies_from_file(&path) {
            Ok(companies) => {
                console.say(&format!(
                    "\nLoaded {} companies from {}",
                    companies.len(),
                    path.display()
                ))?;
                companies
            }
            Err(AppError::CompanyListNotFound(path)) => {
                console.say(&format!("\nError: {} not found", path.display()))?;
                console.say("Create the file with one company name per line")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        },
        BatchSource::Manual => console.read_company_list()?,
    };

    if companies.is_empty() {
        console.say("No companies to research!")?;
        return Ok(());
    }

    console.say("\nCompanies to research:")?;
    for (i, company) in companies.iter().enumerate() {
        console.say(&format!("  {}. {}", i + 1, company))?;
    }

    if !assume_yes && !console.confirm("\nProceed with batch research?")? {
        console.say("Batch research cancelled")?;
        return Ok(());
    }

    let outcome = pipeline.run_batch(&companies, options).await?;
    console.say(&render::render_batch_summary(
        &outcome.entries,
        &outcome.batch_file,
    ))?;
    Ok(())
}
