use std::path::Path;

use anyhow::{Context, Result};
use git2::Repository;
use log::info;

use crate::{
    common::glob::build_globset,
    engine::{
        config::ReviewConfig,
        config_file,
        git::{self, DiffFilter},
        github,
        model::{BranchDiff, PromptContext, SkipReason},
        prompt::render_prompt,
        response::ResponseFile,
        review::ReviewResponse,
        utils::ResponsePath,
    },
    ui::{
        cli::Cli,
        config::{
            build_config_builder, build_exclude_patterns, build_include_patterns,
            patterns_from_strings, valid_patterns_from_strings,
        },
        output::{self, PromptOutput},
        template,
    },
};

#[cfg(feature = "interactive")]
use crate::ui::interactive;

/// The primary orchestration function for the application.
pub fn run(args: Cli) -> Result<()> {
    #[cfg(feature = "clipboard")]
    if args.clipboard_daemon {
        return crate::ui::clipboard::serve_clipboard_daemon(
            args.timeout
                .map(std::time::Duration::from_secs)
                .unwrap_or(crate::engine::config::DEFAULT_TIMEOUT),
        );
    }

    #[cfg(not(feature = "interactive"))]
    if args.interactive {
        anyhow::bail!("Interactive mode requires the 'interactive' feature.");
    }

    let cfg_file: config_file::ConfigFile =
        confy::load("clip-review", None).context("Failed to load config file")?;
    let config = build_review_config(&args, &cfg_file)?;

    // --- Validate repository and branches ---
    let repo = git::open_repository(&config.path)?;
    let repo_root = git::repository_root(&repo);
    let (base, target) = choose_branches(&repo, &config)?;

    // --- Collect diff ---
    let filter = DiffFilter {
        include_set: build_globset(&config.include_patterns)?,
        exclude_set: build_globset(&config.exclude_patterns)?,
        max_diff_lines: config.max_diff_lines,
    };
    let diff = git::collect_branch_diff(&repo, &base, &target, &filter)?;
    ensure_reviewable(&diff)?;
    output::print_diff_overview(&diff);

    // --- Build prompt ---
    let guidelines_arg = args.guidelines.as_deref().or(cfg_file.guidelines.as_deref());
    let work_dir = std::env::current_dir().context("Failed to read the working directory")?;
    let (guidelines, guidelines_origin) = template::resolve_guidelines(&work_dir, guidelines_arg)?;
    let (tpl_content, tpl_origin) = template::resolve_template(&repo_root, args.template.as_deref())?;
    info!("Guidelines: {guidelines_origin}; template: {tpl_origin}");

    let response = ResponseFile::create(ResponsePath::new(&repo_root, &target)?.in_temp_dir())?;
    let context = PromptContext::new(&repo_root, &diff, &guidelines, response.path());
    let prompt = render_prompt(&tpl_content, &context)?;

    // --- Clipboard ---
    PromptOutput::new(&prompt, args.output_file.as_deref(), config.no_clipboard)
        .hold_clipboard_for(config.timeout)
        .handle()?;
    output::print_instructions(
        &response.path().display().to_string(),
        config.timeout.as_secs(),
    );

    // --- Poll, parse, format ---
    let raw = wait_for_response(&response, &config)?;
    let review = ReviewResponse::parse(&raw)
        .with_context(|| format!("Could not parse {}", response.path().display()))?;
    drop(response);
    let body = review.to_markdown();

    // --- Post ---
    let selector = config.pr.clone().unwrap_or_else(|| target.clone());
    post_review(&repo_root, &selector, &body, &config)?;

    output::print_summary(
        &target,
        diff.files.len(),
        diff.skipped.len(),
        review.issues.len(),
    );
    Ok(())
}

/// Merges CLI flags, the config file and defaults.
pub fn build_review_config(args: &Cli, cfg_file: &config_file::ConfigFile) -> Result<ReviewConfig> {
    let include = patterns_from_strings(&build_include_patterns(args, cfg_file))?;
    let exclude = valid_patterns_from_strings(&build_exclude_patterns(args, cfg_file, true));

    build_config_builder(args, cfg_file, |b| {
        b.include_patterns(include);
        b.exclude_patterns(exclude);
    })
    .build()
    .context("Failed to build configuration for review")
}

fn choose_branches(repo: &Repository, config: &ReviewConfig) -> Result<(String, String)> {
    #[cfg(feature = "interactive")]
    if config.interactive && (config.base.is_none() || config.target.is_none()) {
        let branches = git::list_branches(repo)?;
        let base = match &config.base {
            Some(b) => b.clone(),
            None => {
                let default = git::default_base_branch(repo).ok();
                interactive::select_branch("Base branch:", &branches, default.as_deref())?
            }
        };
        let target = match &config.target {
            Some(t) => t.clone(),
            None => {
                let current = git::current_branch(repo).ok();
                interactive::select_branch("Branch to review:", &branches, current.as_deref())?
            }
        };
        return git::resolve_branches(repo, Some(base.as_str()), Some(target.as_str()));
    }

    git::resolve_branches(repo, config.base.as_deref(), config.target.as_deref())
}

fn ensure_reviewable(diff: &BranchDiff) -> Result<()> {
    if !diff.files.is_empty() {
        return Ok(());
    }
    if diff
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::WhitespaceOnly)
    {
        let note = if diff.skipped.is_empty() {
            ""
        } else {
            " (whitespace-only edits are ignored)"
        };
        anyhow::bail!(
            "No changes between '{}' and '{}'{note}; nothing to review",
            diff.base,
            diff.target
        );
    }
    anyhow::bail!(
        "All {} changed file(s) were skipped (excluded, binary, too large or whitespace-only); \
         adjust --exclude or --max-diff-lines",
        diff.skipped.len()
    )
}

fn wait_for_response(response: &ResponseFile, config: &ReviewConfig) -> Result<String> {
    #[cfg(feature = "interactive")]
    {
        let spinner = interactive::WaitSpinner::new(config.timeout);
        let result = response.wait(config.timeout, config.poll_interval, |elapsed| {
            spinner.tick(elapsed)
        });
        spinner.finish();
        result
    }
    #[cfg(not(feature = "interactive"))]
    {
        response.wait(config.timeout, config.poll_interval, |elapsed| {
            log::debug!("Still waiting for response ({}s)", elapsed.as_secs())
        })
    }
}

fn post_review(repo_root: &Path, selector: &str, body: &str, config: &ReviewConfig) -> Result<()> {
    if config.dry_run {
        output::info("Dry run: the comment below was not posted.");
        println!("\n{body}");
        return Ok(());
    }

    #[cfg(feature = "interactive")]
    if config.interactive {
        println!("\n{body}");
        if !interactive::confirm_post(selector)? {
            output::info("Review not posted.");
            return Ok(());
        }
    }

    match github::post_comment(repo_root, selector, body) {
        Ok(url) => {
            output::success(&format!("Review posted to PR '{selector}'."));
            if !url.is_empty() {
                println!("    {url}");
            }
            Ok(())
        }
        Err(e) => {
            // Keep the review recoverable when posting fails.
            eprintln!("\n{body}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{config_file::ConfigFile, model::SkippedFile};
    use std::path::PathBuf;

    fn skipped(path: &str, reason: SkipReason) -> SkippedFile {
        SkippedFile {
            path: PathBuf::from(path),
            reason,
        }
    }

    fn empty_diff(skipped: Vec<SkippedFile>) -> BranchDiff {
        BranchDiff {
            base: "main".into(),
            target: "feature".into(),
            files: vec![],
            skipped,
        }
    }

    #[test]
    fn bad_exclude_keeps_the_other_excludes() {
        let args = Cli {
            exclude: vec!["a/***/b".into(), "{docs".into(), "vendor/**".into()],
            ..Default::default()
        };
        let cfg = build_review_config(&args, &ConfigFile::default()).unwrap();
        let excludes: Vec<&str> = cfg.exclude_patterns.iter().map(|p| p.as_str()).collect();

        assert!(excludes.contains(&"vendor/**"));
        assert!(excludes.contains(&"*.lock"));
        assert!(!excludes.contains(&"a/***/b"));
        assert!(!excludes.contains(&"{docs"));
        assert!(build_globset(&cfg.exclude_patterns).is_ok());
    }

    #[test]
    fn bad_include_is_an_error() {
        let args = Cli {
            include: vec!["{src".into()],
            ..Default::default()
        };
        assert!(build_review_config(&args, &ConfigFile::default()).is_err());
    }

    #[test]
    fn whitespace_only_branch_has_nothing_to_review() {
        let diff = empty_diff(vec![skipped("src/lib.rs", SkipReason::WhitespaceOnly)]);
        let err = ensure_reviewable(&diff).unwrap_err().to_string();
        assert!(err.starts_with("No changes between 'main' and 'feature'"));
        assert!(err.contains("nothing to review"));
    }

    #[test]
    fn all_skipped_branch_is_reported() {
        let diff = empty_diff(vec![
            skipped("Cargo.lock", SkipReason::Excluded),
            skipped("src/lib.rs", SkipReason::WhitespaceOnly),
        ]);
        let err = ensure_reviewable(&diff).unwrap_err().to_string();
        assert!(err.contains("All 2 changed file(s) were skipped"));
        assert!(ensure_reviewable(&empty_diff(vec![])).is_err());
    }
}
