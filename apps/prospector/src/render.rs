//! Plain-text rendering of results for the terminal.

use std::fmt::Write;
use std::path::Path;

use crate::research::models::{BatchEntry, ResearchResult};

/// Number of sources listed in the summary; the rest are only counted.
const SOURCES_SHOWN: usize = 5;

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(60).collect()
}

/// Full summary of one result: pain points, hook and the top sources.
pub fn render_result(result: &ResearchResult) -> String {
    let heavy = rule('=');
    let light = rule('-');
    let mut out = String::new();

    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "RESEARCH RESULTS");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "\nCompany: {}", result.company_name);
    let _ = writeln!(out, "Researched: {}", result.timestamp.to_rfc3339());

    let _ = writeln!(out, "\n{light}\nIDENTIFIED PAIN POINTS:\n{light}");
    let _ = writeln!(out, "{}", result.pain_points);

    let _ = writeln!(out, "\n{light}\nPERSONALIZED EMAIL HOOK:\n{light}");
    let _ = writeln!(out, "{}", result.email_hook);

    let _ = writeln!(
        out,
        "\n{light}\nSOURCES ({} found):\n{light}",
        result.sources.len()
    );
    for (i, source) in result.sources.iter().take(SOURCES_SHOWN).enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, source.title);
        let _ = writeln!(out, "   {}", source.url);
    }

    let _ = writeln!(out, "\n{heavy}");
    out
}

/// Success/error counts, the failed companies and where the batch was saved.
pub fn render_batch_summary(entries: &[BatchEntry], batch_file: &Path) -> String {
    let heavy = rule('=');
    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| e.is_error()).collect();
    let mut out = String::new();

    let _ = writeln!(out, "{heavy}\nBATCH RESEARCH COMPLETE\n{heavy}");
    let _ = writeln!(
        out,
        "Successfully researched: {}",
        entries.len() - failed.len()
    );
    let _ = writeln!(out, "Errors: {}", failed.len());
    for entry in &failed {
        let _ = writeln!(out, "  - {}", entry.company_name());
    }
    let _ = writeln!(out, "Batch results saved to: {}", batch_file.display());
    out
}
