use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use log::info;

const GH: &str = "gh";

/// Arguments for `gh pr comment`, reading the body from stdin.
pub fn comment_args(selector: &str) -> Vec<String> {
    vec![
        "pr".to_string(),
        "comment".to_string(),
        selector.to_string(),
        "--body-file".to_string(),
        "-".to_string(),
    ]
}

/// Posts `body` as a comment on the pull request identified by `selector`
/// (a number, URL or branch name) using the GitHub CLI.
///
/// Returns whatever gh prints on success, normally the comment URL.
pub fn post_comment(repo_dir: &Path, selector: &str, body: &str) -> Result<String> {
    info!("Posting review comment to PR {selector:?}");
    let mut child = Command::new(GH)
        .args(comment_args(selector))
        .current_dir(repo_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to run `gh`. Is the GitHub CLI installed and on PATH?")?;

    {
        let mut stdin = child.stdin.take().context("Failed to open gh stdin")?;
        stdin
            .write_all(body.as_bytes())
            .context("Failed to send comment body to gh")?;
    }

    let output = child
        .wait_with_output()
        .context("Failed to wait for gh to finish")?;
    if !output.status.success() {
        bail!(
            "gh pr comment failed for '{selector}': {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
