use anyhow::{Context, Result, anyhow, bail};
use git2::{BranchType, Commit, Delta, DiffOptions, Patch, Repository};
use globset::GlobSet;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::engine::{
    filter::should_review_file,
    model::{BranchDiff, ChangeStatus, FileDiff, SkipReason, SkippedFile},
};

/// Base branches tried, in order, when none is configured.
const DEFAULT_BASE_CANDIDATES: &[&str] = &["main", "master"];

/// Which changed files make it into the prompt.
pub struct DiffFilter {
    pub include_set: GlobSet,
    pub exclude_set: GlobSet,
    pub max_diff_lines: usize,
}

/// Opens the repository containing `path`, searching parent directories.
pub fn open_repository(path: &Path) -> Result<Repository> {
    info!("Opening repository at path: {:?}", path);
    Repository::discover(path).with_context(|| {
        format!(
            "Not a git repository (or any parent directory): {}",
            path.display()
        )
    })
}

/// The working directory of the repository, or its git dir for bare repositories.
pub fn repository_root(repo: &Repository) -> PathBuf {
    repo.workdir()
        .unwrap_or_else(|| repo.path())
        .to_path_buf()
}

/// Resolves a branch (or any ref git understands) to its commit.
///
/// # Arguments
///
/// * `repo` - The repository to look the branch up in
/// * `branch` - A branch name such as `main` or `origin/feature`
///
/// # Returns
///
/// * `Result<Commit>` - The commit the branch points to, or an error naming the branch
pub fn resolve_commit<'r>(repo: &'r Repository, branch: &str) -> Result<Commit<'r>> {
    if branch.trim().is_empty() {
        bail!("Branch name must not be empty");
    }
    repo.revparse_single(branch)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|e| {
            debug!("revparse of {branch:?} failed: {e}");
            anyhow!("Branch '{branch}' not found in repository")
        })
}

/// Short name of the currently checked-out branch.
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo
        .head()
        .context("Repository has no HEAD yet; pass --target explicitly")?;
    if !head.is_branch() {
        bail!("HEAD is detached; pass --target explicitly");
    }
    head.shorthand()
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("Current branch name is not valid UTF-8"))
}

/// Picks the first conventional base branch that exists.
pub fn default_base_branch(repo: &Repository) -> Result<String> {
    DEFAULT_BASE_CANDIDATES
        .iter()
        .find(|name| resolve_commit(repo, name).is_ok())
        .map(|name| name.to_string())
        .ok_or_else(|| {
            anyhow!(
                "Could not find a default base branch (tried {}); pass --base explicitly",
                DEFAULT_BASE_CANDIDATES.join(", ")
            )
        })
}

/// Local branch names, sorted.
pub fn list_branches(repo: &Repository) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for branch in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = branch?;
        if let Some(name) = branch.name()? {
            names.push(name.to_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Fills in defaults for base and target, then validates both.
pub fn resolve_branches(
    repo: &Repository,
    base: Option<&str>,
    target: Option<&str>,
) -> Result<(String, String)> {
    let base = match base {
        Some(b) => b.to_owned(),
        None => default_base_branch(repo)?,
    };
    let target = match target {
        Some(t) => t.to_owned(),
        None => current_branch(repo)?,
    };

    for branch in [&base, &target] {
        resolve_commit(repo, branch)?;
    }
    if base == target {
        bail!("Base and target are both '{base}'; nothing to compare");
    }
    Ok((base, target))
}

/// Collects the per-file diff a pull request from `target` into `base` would show.
///
/// The comparison starts at the merge base of the two branches, so commits that
/// landed on `base` after `target` forked do not show up as reverted changes.
pub fn collect_branch_diff(
    repo: &Repository,
    base: &str,
    target: &str,
    filter: &DiffFilter,
) -> Result<BranchDiff> {
    let base_commit = resolve_commit(repo, base)?;
    let target_commit = resolve_commit(repo, target)?;

    let merge_base = repo
        .merge_base(base_commit.id(), target_commit.id())
        .with_context(|| format!("Branches '{base}' and '{target}' share no history"))?;
    let base_tree = repo.find_commit(merge_base)?.tree()?;
    let target_tree = target_commit.tree()?;

    let mut opts = DiffOptions::new();
    opts.ignore_whitespace(true).context_lines(3);
    let diff = repo
        .diff_tree_to_tree(Some(&base_tree), Some(&target_tree), Some(&mut opts))
        .context("Failed to generate diff between branches")?;

    let mut files = Vec::new();
    let mut skipped = Vec::new();

    for idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(idx) else {
            continue;
        };
        let Some(status) = change_status(delta.status()) else {
            continue;
        };
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(Path::to_path_buf)
            .context("Diff entry has no path")?;

        if !should_review_file(&path, &filter.include_set, &filter.exclude_set) {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::Excluded,
            });
            continue;
        }

        let Some(mut patch) = Patch::from_diff(&diff, idx)? else {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::Binary,
            });
            continue;
        };
        let patch_delta = patch.delta();
        if patch_delta.flags().is_binary()
            || patch_delta.new_file().is_binary()
            || patch_delta.old_file().is_binary()
        {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::Binary,
            });
            continue;
        }

        let (_, additions, deletions) = patch.line_stats()?;
        let lines = additions + deletions;
        if lines == 0 && patch.num_hunks() == 0 && status == ChangeStatus::Modified {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::WhitespaceOnly,
            });
            continue;
        }
        if lines > filter.max_diff_lines {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::TooLarge {
                    lines,
                    limit: filter.max_diff_lines,
                },
            });
            continue;
        }

        let buf = patch
            .to_buf()
            .with_context(|| format!("Failed to render patch for {}", path.display()))?;
        files.push(FileDiff {
            path,
            status,
            additions,
            deletions,
            patch: String::from_utf8_lossy(&buf).into_owned(),
        });
    }

    info!(
        "Collected diff {base}...{target}: {} file(s) to review, {} skipped",
        files.len(),
        skipped.len()
    );
    Ok(BranchDiff {
        base: base.to_owned(),
        target: target.to_owned(),
        files,
        skipped,
    })
}

fn change_status(delta: Delta) -> Option<ChangeStatus> {
    match delta {
        Delta::Added | Delta::Untracked => Some(ChangeStatus::Added),
        Delta::Deleted => Some(ChangeStatus::Deleted),
        Delta::Modified => Some(ChangeStatus::Modified),
        Delta::Renamed => Some(ChangeStatus::Renamed),
        Delta::Copied => Some(ChangeStatus::Copied),
        Delta::Typechange => Some(ChangeStatus::TypeChange),
        Delta::Unmodified | Delta::Ignored | Delta::Unreadable | Delta::Conflicted => None,
    }
}
