mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use assert_cmd::Command;
use clip_review::engine::utils::ResponsePath;
use predicates::prelude::*;

use common::*;

/// The binary with config lookups confined to `home`.
fn clip_review_cmd(cwd: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clip-review").unwrap();
    cmd.current_dir(cwd)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

const ANSWER: &str = r#"{
  "summary": "Bumps the answer to 42.",
  "positivePoints": ["Small, focused change"],
  "issues": [
    {"file": "src/lib.rs", "line": 2, "description": "Magic number without a comment."}
  ]
}"#;

/// Plays the human: once the run has cleared the planted stale file, saves the answer.
fn answer_when_ready(path: PathBuf) -> JoinHandle<bool> {
    thread::spawn(move || {
        let deadline = Instant::now() + Duration::from_secs(20);
        while path.exists() {
            if Instant::now() > deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(50));
        }
        fs::write(&path, ANSWER).unwrap();
        true
    })
}

/// A repo whose feature branch changes one line, and the response path a run on it will use.
fn reviewable_repo(tmp: &Path) -> (tempfile::TempDir, PathBuf) {
    let (dir, repo) = repo_with_feature_branch();
    commit_files(&repo, &[("src/lib.rs", "pub fn answer() -> u32 {\n    42\n}\n")], "fix");
    let response = ResponsePath::new(dir.path(), "feature").unwrap().in_dir(tmp);
    fs::write(&response, "{\"summary\": \"stale answer from an earlier run\"}").unwrap();
    (dir, response)
}

#[test]
fn test_help_lists_flags() {
    let home = tempfile::tempdir().unwrap();
    clip_review_cmd(home.path(), home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("clipboard")
                .and(predicate::str::contains("--base"))
                .and(predicate::str::contains("--target"))
                .and(predicate::str::contains("--interactive"))
                .and(predicate::str::contains("-b"))
                .and(predicate::str::contains("-t"))
                .and(predicate::str::contains("-i"))
                .and(predicate::str::contains("clipboard-daemon").not()),
        );
}

#[test]
fn test_short_help_flag() {
    let home = tempfile::tempdir().unwrap();
    clip_review_cmd(home.path(), home.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_outside_repository_fails() {
    let home = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    clip_review_cmd(work.path(), home.path())
        .args(["--base", "main", "--target", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn test_invalid_target_branch_is_descriptive() {
    let home = tempfile::tempdir().unwrap();
    let (dir, _repo) = repo_with_feature_branch();
    clip_review_cmd(dir.path(), home.path())
        .args(["--base", "main", "--target", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Branch 'does-not-exist' not found in repository",
        ));
}

#[test]
fn test_invalid_base_branch_is_descriptive() {
    let home = tempfile::tempdir().unwrap();
    let (dir, _repo) = repo_with_feature_branch();
    clip_review_cmd(dir.path(), home.path())
        .args(["-b", "mian", "-t", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Branch 'mian' not found"));
}

#[test]
fn test_branches_without_changes_fail_before_prompting() {
    let home = tempfile::tempdir().unwrap();
    let (dir, _repo) = repo_with_feature_branch();
    clip_review_cmd(dir.path(), home.path())
        .args(["--no-clipboard", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes between 'main' and 'feature'"));
}

#[test]
fn test_timeout_exits_nonzero_and_removes_response_file() {
    let home = tempfile::tempdir().unwrap();
    let (dir, repo) = repo_with_feature_branch();
    commit_files(&repo, &[("src/lib.rs", "pub fn answer() -> u32 {\n    42\n}\n")], "fix");

    let assert = clip_review_cmd(dir.path(), home.path())
        .args(["--no-clipboard", "--timeout", "1", "--poll-interval", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--- PROMPT START ---"))
        .stdout(predicate::str::contains("+    42"))
        .stderr(predicate::str::contains("Timed out"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let response_path = stdout
        .lines()
        .map(str::trim)
        .find(|l| l.contains("clip-review_") && l.ends_with(".json"))
        .expect("response path printed")
        .to_string();
    assert!(!Path::new(&response_path).exists());
}

#[test]
fn test_dry_run_prints_formatted_review() {
    let home = tempfile::tempdir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let (dir, response) = reviewable_repo(tmp.path());
    let human = answer_when_ready(response.clone());

    clip_review_cmd(dir.path(), home.path())
        .env("TMPDIR", tmp.path())
        .args(["--no-clipboard", "--dry-run", "--timeout", "30", "--poll-interval", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## AI Code Review"))
        .stdout(predicate::str::contains("Bumps the answer to 42."))
        .stdout(predicate::str::contains("Magic number without a comment."))
        .stdout(predicate::str::contains("stale answer").not());

    assert!(human.join().unwrap());
    assert!(!response.exists());
}

#[test]
fn test_failed_post_keeps_review_on_stderr() {
    let home = tempfile::tempdir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let no_tools = tempfile::tempdir().unwrap();
    let (dir, response) = reviewable_repo(tmp.path());
    let human = answer_when_ready(response.clone());

    clip_review_cmd(dir.path(), home.path())
        .env("TMPDIR", tmp.path())
        .env("PATH", no_tools.path())
        .args(["--no-clipboard", "--timeout", "30", "--poll-interval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("## AI Code Review"))
        .stderr(predicate::str::contains("Failed to run `gh`"));

    assert!(human.join().unwrap());
    assert!(!response.exists());
}
