//! JSON persistence for research results and batches.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::research::models::{BatchEntry, ResearchResult};

const FILENAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// `research_<company>_<YYYYmmdd_HHMMSS>.json`, spaces in the name replaced by `_`.
pub fn default_result_filename(company_name: &str, now: DateTime<Local>) -> String {
    format!(
        "research_{}_{}.json",
        company_name.replace(' ', "_"),
        now.format(FILENAME_TIMESTAMP)
    )
}

/// `batch_results_<YYYYmmdd_HHMMSS>.json`.
pub fn default_batch_filename(now: DateTime<Local>) -> String {
    format!("batch_results_{}.json", now.format(FILENAME_TIMESTAMP))
}

/// Writes `result` into `dir`, under `filename` or the default name. Returns the path.
pub fn save_result(
    dir: &Path,
    result: &ResearchResult,
    filename: Option<&str>,
) -> Result<PathBuf, AppError> {
    let path = match filename {
        Some(name) => dir.join(name),
        None => dir.join(default_result_filename(&result.company_name, Local::now())),
    };
    write_json(&path, result)?;
    info!("Results saved to: {}", path.display());
    Ok(path)
}

/// Writes the whole batch (successes and error placeholders) as one array.
pub fn save_batch(dir: &Path, entries: &[BatchEntry]) -> Result<PathBuf, AppError> {
    let path = dir.join(default_batch_filename(Local::now()));
    write_json(&path, entries)?;
    info!("Batch results saved to: {}", path.display());
    Ok(path)
}

pub fn load_result(path: &Path) -> Result<ResearchResult, AppError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn load_batch(path: &Path) -> Result<Vec<BatchEntry>, AppError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
