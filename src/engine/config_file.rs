use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents the structure of the `clip-review` config file.
/// All fields are optional, so users only need to specify what they want to override.
#[derive(Default, Serialize, Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub base_branch: Option<String>,
    pub max_diff_lines: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub no_default_excludes: Option<bool>,
    /// Guidelines file used when `--guidelines` is not given.
    pub guidelines: Option<PathBuf>,
}
