//! Prompts and progress display for `--interactive` runs.
#![cfg(feature = "interactive")]

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select};

/// Asks for a branch, putting `preferred` first when it is in the list.
pub fn select_branch(label: &str, branches: &[String], preferred: Option<&str>) -> Result<String> {
    let start = preferred
        .and_then(|p| branches.iter().position(|b| b == p))
        .unwrap_or(0);
    Select::new(label, branches.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .with_context(|| format!("No branch selected for '{label}'"))
}

pub fn confirm_post(selector: &str) -> Result<bool> {
    Confirm::new(&format!("Post this review as a comment on PR '{selector}'?"))
        .with_default(true)
        .prompt()
        .context("Confirmation prompt failed")
}

/// A spinner counting down to the response timeout.
pub struct WaitSpinner {
    bar: ProgressBar,
    timeout: Duration,
}

impl WaitSpinner {
    pub fn new(timeout: Duration) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, timeout }
    }

    pub fn tick(&self, elapsed: Duration) {
        let left = self.timeout.saturating_sub(elapsed).as_secs();
        self.bar.set_message(format!(
            "Waiting for the review JSON… {}:{:02} left",
            left / 60,
            left % 60
        ));
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
