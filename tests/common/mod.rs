#![allow(dead_code)]

use std::fs;

use git2::{Commit, IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature, build::CheckoutBuilder};
use tempfile::TempDir;

/// A scratch repository whose initial branch is `main`.
pub fn init_repo() -> (TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).unwrap();
    (dir, repo)
}

pub fn write_file(repo: &Repository, path: &str, content: &[u8]) {
    let full = repo.workdir().unwrap().join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

/// Writes `files` and commits everything in the working tree on the current branch.
pub fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str) -> Oid {
    for (path, content) in files {
        write_file(repo, path, content.as_bytes());
    }
    commit_all(repo, message)
}

pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Creates `name` at the current HEAD commit without switching to it.
pub fn create_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
}

/// Points HEAD at `name` and resets the working tree to match it.
pub fn switch_to(repo: &Repository, name: &str) {
    let refname = format!("refs/heads/{name}");
    let target = repo.revparse_single(&refname).unwrap();
    repo.checkout_tree(&target, Some(CheckoutBuilder::new().force()))
        .unwrap();
    repo.set_head(&refname).unwrap();
}

/// `main` with one commit and a `feature` branch forked from it, checked out.
pub fn repo_with_feature_branch() -> (TempDir, Repository) {
    let (dir, repo) = init_repo();
    commit_files(
        &repo,
        &[
            ("src/lib.rs", "pub fn answer() -> u32 {\n    41\n}\n"),
            ("README.md", "# demo\n"),
        ],
        "initial",
    );
    create_branch(&repo, "feature");
    switch_to(&repo, "feature");
    (dir, repo)
}
