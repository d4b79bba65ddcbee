use anyhow::Result;
use std::time::Duration;
#[cfg(feature = "colors")]
use colored::Colorize;

use crate::common::format::{format_count, pluralize};
use crate::engine::model::BranchDiff;
use crate::ui::template::write_to_file;

#[cfg(feature = "clipboard")]
use crate::ui::clipboard;

/// Delivers the rendered prompt to the human: clipboard, file, or stdout.
pub struct PromptOutput<'a> {
    rendered: &'a str,
    output_file: Option<&'a str>,
    no_clipboard: bool,
    clipboard_hold: Duration,
}

impl<'a> PromptOutput<'a> {
    pub fn new(rendered: &'a str, output_file: Option<&'a str>, no_clipboard: bool) -> Self {
        Self {
            rendered,
            output_file,
            no_clipboard,
            clipboard_hold: crate::engine::config::DEFAULT_TIMEOUT,
        }
    }

    /// How long the clipboard should keep the prompt where the platform needs a holder.
    pub fn hold_clipboard_for(mut self, hold: Duration) -> Self {
        self.clipboard_hold = hold;
        self
    }

    /// Returns whether the prompt reached the clipboard.
    pub fn handle(&self) -> Result<bool> {
        let clipboard_ok = self.copy();

        if let Some(path) = self.output_file {
            write_to_file(path, self.rendered)?;
        }
        if !clipboard_ok {
            println!(
                "\n--- PROMPT START ---\n{}\n--- PROMPT END ---\n",
                self.rendered
            );
        }
        Ok(clipboard_ok)
    }

    #[cfg(feature = "clipboard")]
    fn copy(&self) -> bool {
        if self.no_clipboard {
            return false;
        }
        match clipboard::copy_to_clipboard(self.rendered, self.clipboard_hold) {
            Ok(()) => {
                success(&format!(
                    "Prompt copied to clipboard ({} characters).",
                    format_count(self.rendered.chars().count())
                ));
                true
            }
            Err(e) => {
                log::warn!("Clipboard unavailable: {e:#}");
                info("Could not reach the clipboard; copy the prompt below.");
                false
            }
        }
    }

    #[cfg(not(feature = "clipboard"))]
    fn copy(&self) -> bool {
        false
    }
}

/// Tells the human what to do with the prompt.
pub fn print_instructions(response_path: &str, timeout_secs: u64) {
    info("Paste the prompt into your AI chat and save its JSON answer to:");
    println!("    {response_path}");
    info(&format!(
        "Waiting up to {} for the file to appear…",
        pluralize(timeout_secs, "second", "seconds")
    ));
}

pub fn print_diff_overview(diff: &BranchDiff) {
    info(&format!(
        "Comparing {} → {}: {} to review ({}), {} skipped.",
        diff.base,
        diff.target,
        pluralize(diff.files.len() as u64, "file", "files"),
        pluralize(diff.total_changed_lines() as u64, "changed line", "changed lines"),
        diff.skipped.len()
    ));
    for s in &diff.skipped {
        println!("    - {} ({})", s.path.display(), s.reason);
    }
}

pub fn print_summary(target: &str, reviewed: usize, skipped: usize, issues: usize) {
    let line = "=".repeat(40);
    println!(
        "\n{line}\n🔀 Branch Reviewed: {target}\n📄 Files Reviewed: {}\n⏭️  Files Skipped: {}\n⚠️  Issues Reported: {}\n{line}",
        format_count(reviewed),
        format_count(skipped),
        format_count(issues)
    );
}

#[cfg(feature = "colors")]
pub fn info(msg: &str) {
    println!("{} {}", "[i]".bold().blue(), msg.yellow());
}
#[cfg(not(feature = "colors"))]
pub fn info(msg: &str) {
    println!("[i] {msg}");
}

#[cfg(feature = "colors")]
pub fn success(msg: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "✓".bold().green(),
        "]".bold().white(),
        msg.green()
    );
}
#[cfg(not(feature = "colors"))]
pub fn success(msg: &str) {
    println!("[✓] {msg}");
}
