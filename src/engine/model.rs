use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How a file changed between the merge base and the target branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChange,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Added => write!(f, "added"),
            ChangeStatus::Deleted => write!(f, "deleted"),
            ChangeStatus::Modified => write!(f, "modified"),
            ChangeStatus::Renamed => write!(f, "renamed"),
            ChangeStatus::Copied => write!(f, "copied"),
            ChangeStatus::TypeChange => write!(f, "typechange"),
        }
    }
}

/// A changed file whose patch goes into the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiff {
    pub path: PathBuf,
    pub status: ChangeStatus,
    pub additions: usize,
    pub deletions: usize,
    pub patch: String,
}

impl FileDiff {
    pub fn changed_lines(&self) -> usize {
        self.additions + self.deletions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Excluded,
    Binary,
    TooLarge { lines: usize, limit: usize },
    /// Only whitespace changed, which the diff ignores.
    WhitespaceOnly,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Excluded => write!(f, "excluded by pattern"),
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::TooLarge { lines, limit } => {
                write!(f, "diff too large ({lines} changed lines, limit {limit})")
            }
            SkipReason::WhitespaceOnly => write!(f, "whitespace-only change"),
        }
    }
}

/// A changed file left out of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything collected between two branches.
#[derive(Debug, Clone)]
pub struct BranchDiff {
    pub base: String,
    pub target: String,
    pub files: Vec<FileDiff>,
    pub skipped: Vec<SkippedFile>,
}

impl BranchDiff {
    pub fn total_changed_lines(&self) -> usize {
        self.files.iter().map(FileDiff::changed_lines).sum()
    }
}

/// Serialized view of a skipped file for the prompt template.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedContext {
    pub path: String,
    pub reason: String,
}

/// The data passed to the Handlebars prompt template.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub repository: String,
    pub base: String,
    pub target: String,
    pub guidelines: String,
    pub files: Vec<FileDiff>,
    pub skipped: Vec<SkippedContext>,
    pub response_path: String,
    pub response_schema: String,
}
