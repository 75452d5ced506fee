//! Colored CLI display utilities.
//!
//! One status line per check, in the same timestamp format tracing uses.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::render::{RenderOutcome, RenderStatus};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Plain tag for a render status.
#[must_use]
pub fn status_tag(status: RenderStatus) -> &'static str {
    match status {
        RenderStatus::Created => "[CREATED]",
        RenderStatus::Updated => "[UPDATED]",
        RenderStatus::Unchanged => "[UNCHANGED]",
    }
}

/// Print the outcome of rendering one check.
pub fn print_outcome(outcome: &RenderOutcome) {
    let tag = status_tag(outcome.status);
    let tag = match outcome.status {
        RenderStatus::Created => tag.green().bold().to_string(),
        RenderStatus::Updated => tag.yellow().bold().to_string(),
        RenderStatus::Unchanged => tag.dimmed().to_string(),
    };
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        tag,
        outcome.name.bold(),
        outcome.path.display().to_string().dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print the outcome of removing one check.
pub fn print_removed(name: &str, removed: bool) {
    let tag = if removed {
        "[REMOVED]".red().bold().to_string()
    } else {
        "[ABSENT]".dimmed().to_string()
    };
    println!("{} {} {}", timestamp().dimmed(), tag, name.bold());
    let _ = io::stdout().flush();
}

/// Print a summary after a batch render.
pub fn print_summary(outcomes: &[RenderOutcome]) {
    let changed = outcomes.iter().filter(|o| o.changed()).count();
    println!(
        "{} {} {} checks, {} changed",
        timestamp().dimmed(),
        "[DONE]".blue().bold(),
        outcomes.len(),
        changed
    );
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
