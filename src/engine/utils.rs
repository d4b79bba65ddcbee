use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Maps a repository + target branch to the temp file the review answer is expected at.
#[derive(Clone)]
pub struct ResponsePath {
    key_hash: String,
}

impl ResponsePath {
    pub fn new<P: AsRef<Path>>(repo_root: P, target: &str) -> Result<Self> {
        let repo_root = repo_root.as_ref();
        if !repo_root.exists() {
            return Err(anyhow::anyhow!(
                "Repository path does not exist: {}",
                repo_root.display()
            ));
        }

        let canonical_path = repo_root.canonicalize().with_context(|| {
            format!(
                "Failed to canonicalize repository path: {}",
                repo_root.display()
            )
        })?;

        let key_hash = {
            let mut hasher = Sha256::new();
            hasher.update(canonical_path.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            hasher.update(target.as_bytes());
            hex::encode(hasher.finalize())
        };

        Ok(Self { key_hash })
    }

    /// `<temp dir>/clip-review_<12 hex chars>.json`
    pub fn in_dir(&self, dir: &Path) -> PathBuf {
        dir.join(format!("clip-review_{}.json", &self.key_hash[..12]))
    }

    pub fn in_temp_dir(&self) -> PathBuf {
        self.in_dir(&std::env::temp_dir())
    }
}
