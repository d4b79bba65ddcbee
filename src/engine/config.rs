// src/engine/config.rs

use derive_builder::Builder;
use glob::Pattern;
use std::path::PathBuf;
use std::time::Duration;

/// Default ceiling on added + removed lines for a single file's diff.
pub const DEFAULT_MAX_DIFF_LINES: usize = 1000;
/// How long to wait for the response file before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Fully resolved settings for one review run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(name = "build_internal"))]
pub struct ReviewConfig {
    #[builder(default = "PathBuf::from(\".\")")]
    pub path: PathBuf,

    /// Branch the pull request merges into. `None` means detect `main`/`master`.
    #[builder(default)]
    pub base: Option<String>,

    /// Branch under review. `None` means the currently checked-out branch.
    #[builder(default)]
    pub target: Option<String>,

    /// Explicit `gh pr comment` selector. Falls back to the target branch.
    #[builder(default)]
    pub pr: Option<String>,

    #[builder(default)]
    pub include_patterns: Vec<Pattern>,

    #[builder(default)]
    pub exclude_patterns: Vec<Pattern>,

    #[builder(default = "DEFAULT_MAX_DIFF_LINES")]
    pub max_diff_lines: usize,

    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,

    #[builder(default = "DEFAULT_POLL_INTERVAL")]
    pub poll_interval: Duration,

    #[builder(default)]
    pub interactive: bool,
    #[builder(default)]
    pub no_clipboard: bool,
    #[builder(default)]
    pub dry_run: bool,
}

impl ReviewConfigBuilder {
    pub fn build(&self) -> Result<ReviewConfig, ReviewConfigBuilderError> {
        let config = self.build_internal()?;
        if config.poll_interval.is_zero() {
            return Err(ReviewConfigBuilderError::ValidationError(
                "poll interval must be greater than zero".into(),
            ));
        }
        Ok(config)
    }
}
