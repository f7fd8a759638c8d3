//! Terminal rendering of the display regions.

use console::style;

use crate::models::{AnalysisRecord, SelectedFile};
use crate::services::PollEvent;
use crate::state::{Prompt, UploadForm};
use crate::utils::{format_size, mime_icon};

/// One-line description of a file.
pub fn file_line(file: &SelectedFile) -> String {
    format!(
        "{} {} ({}, {})",
        mime_icon(&file.mime_type),
        file.name,
        file.mime_type,
        format_size(file.size_bytes)
    )
}

/// Render the upload form.
pub fn format_form(form: &UploadForm) -> String {
    let prompt = match &form.prompt {
        Prompt::Selected(name) => style(name.as_str()).bold().to_string(),
        other => style(other.text()).dim().to_string(),
    };

    let mut out = format!("{}\n  {}", style("Upload your file").bold(), prompt);
    if let Some(error) = &form.error {
        out.push_str(&format!("\n  {}", style(error).red()));
    }
    out
}

pub fn print_form(form: &UploadForm) {
    println!("{}", format_form(form));
}

/// Render the analysis panel.
pub fn format_analysis(record: &AnalysisRecord) -> String {
    let mut out = format!("\n{}\n{}", style("Document Analysis").bold(), "-".repeat(50));

    if let Some(score) = record.risk_score {
        let score_text = format!("{}", score);
        let styled = if score >= 7.0 {
            style(score_text).red().bold()
        } else if score >= 4.0 {
            style(score_text).yellow().bold()
        } else {
            style(score_text).green().bold()
        };
        out.push_str(&format!("\n{:<15} {}", "Risk score:", styled));
    }

    if let Some(points) = &record.summary_points {
        out.push_str(&format!("\n\n{}", style("Summary").cyan()));
        for point in points {
            out.push_str(&format!("\n  • {}", point));
        }
    }

    if let Some(clauses) = &record.flagged_clauses {
        out.push_str(&format!("\n\n{}", style("Flagged clauses").cyan()));
        for clause in clauses {
            out.push_str(&format!("\n  {} {}", style("!").yellow(), clause));
        }
    }

    if record.is_empty() {
        out.push_str(&format!("\n{}", style("(no fields returned)").dim()));
    }
    out
}

pub fn print_analysis(record: &AnalysisRecord) {
    println!("{}", format_analysis(record));
}

pub fn print_viewer(url: &str) {
    println!("\n{} {}", style("Document:").bold(), url);
}

/// Spinner message for a poller event.
pub fn poll_message(event: &PollEvent) -> String {
    match event {
        PollEvent::AttemptStarted { attempt } => {
            format!("Waiting for text extraction (attempt {})...", attempt)
        }
        PollEvent::NotReady { attempt } => {
            format!("Text not ready after attempt {}, retrying...", attempt)
        }
        PollEvent::AttemptFailed { attempt, error } => {
            format!("Attempt {} failed ({}), retrying...", attempt, error)
        }
        PollEvent::Ready { chars, .. } => format!("Extracted {} chars", chars),
        PollEvent::Cancelled { .. } => "Cancelled".to_string(),
    }
}
