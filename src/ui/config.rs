use std::time::Duration;

use anyhow::{Context, Result};
use glob::Pattern;
use globset::Glob;
use log::warn;

use crate::engine::{config::ReviewConfigBuilder, config_file};
use crate::ui::cli::Cli;

/// Lockfiles and generated assets nobody wants reviewed line by line.
const DEFAULT_EXCLUDES: &[&str] = &[
    "*.lock",
    "**/package-lock.json",
    "**/pnpm-lock.yaml",
    "*.min.js",
    "*.min.css",
    "*.map",
];

pub fn build_config_builder(
    args: &Cli,
    cfg_file: &config_file::ConfigFile,
    extra: impl FnOnce(&mut ReviewConfigBuilder),
) -> ReviewConfigBuilder {
    let mut b = ReviewConfigBuilder::default();
    b.base(args.base.clone().or_else(|| cfg_file.base_branch.clone()))
        .target(args.target.clone())
        .pr(args.pr.clone())
        .interactive(args.interactive)
        .no_clipboard(args.no_clipboard)
        .dry_run(args.dry_run);

    if let Some(n) = args.max_diff_lines.or(cfg_file.max_diff_lines) {
        b.max_diff_lines(n);
    }
    if let Some(secs) = args.timeout.or(cfg_file.timeout_secs) {
        b.timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.poll_interval.or(cfg_file.poll_interval_secs) {
        b.poll_interval(Duration::from_secs(secs));
    }

    extra(&mut b);
    b
}

pub fn build_include_patterns(args: &Cli, cfg_file: &config_file::ConfigFile) -> Vec<String> {
    let mut inc = cfg_file.include.clone().unwrap_or_default();
    inc.extend(args.include.clone());
    inc
}

pub fn build_exclude_patterns(
    args: &Cli,
    cfg_file: &config_file::ConfigFile,
    with_defaults: bool,
) -> Vec<String> {
    let mut ex = cfg_file.exclude.clone().unwrap_or_default();
    ex.extend(args.exclude.clone());
    if with_defaults && !(args.no_default_excludes || cfg_file.no_default_excludes.unwrap_or(false))
    {
        ex.extend(DEFAULT_EXCLUDES.iter().map(|s| s.to_string()));
    }
    ex
}

/// Checks a pattern against both the `glob` syntax it is stored as and the
/// `globset` syntax it is matched with.
fn validate_pattern(p: &str) -> Result<Pattern> {
    Glob::new(p).with_context(|| format!("Invalid glob pattern: '{p}'"))?;
    Pattern::new(p).with_context(|| format!("Invalid glob pattern: '{p}'"))
}

/// All patterns must be valid.
pub fn patterns_from_strings(v: &[String]) -> Result<Vec<Pattern>> {
    v.iter().map(|p| validate_pattern(p)).collect()
}

/// Keeps the valid patterns, warning about each one that is dropped.
pub fn valid_patterns_from_strings(v: &[String]) -> Vec<Pattern> {
    v.iter()
        .filter_map(|p| match validate_pattern(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Ignoring exclude pattern: {e:#}");
                None
            }
        })
        .collect()
}
