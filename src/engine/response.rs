//! Waiting for the reviewer's JSON answer to land on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

/// The temp file the review answer is expected at.
///
/// Any file already at the path is removed on creation so a previous run's
/// answer is never picked up, and the file is removed again on drop.
#[derive(Debug)]
pub struct ResponseFile {
    path: PathBuf,
}

impl ResponseFile {
    pub fn create(path: PathBuf) -> Result<Self> {
        if path.exists() {
            info!("Removing stale response file {}", path.display());
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale file {}", path.display()))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-checks for the file every `interval` until it is non-empty and its size
    /// held still across two checks, then returns its contents.
    ///
    /// `on_tick` is called with the elapsed time before every sleep.
    pub fn wait(
        &self,
        timeout: Duration,
        interval: Duration,
        mut on_tick: impl FnMut(Duration),
    ) -> Result<String> {
        let start = Instant::now();
        let mut last_len: Option<u64> = None;

        loop {
            match fs::metadata(&self.path) {
                Ok(meta) if meta.len() > 0 => {
                    if last_len == Some(meta.len()) {
                        debug!("Response file settled at {} bytes", meta.len());
                        return fs::read_to_string(&self.path).with_context(|| {
                            format!("Failed to read response file {}", self.path.display())
                        });
                    }
                    last_len = Some(meta.len());
                }
                _ => last_len = None,
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                bail!(
                    "Timed out after {}s waiting for {}",
                    timeout.as_secs(),
                    self.path.display()
                );
            }
            on_tick(elapsed);
            thread::sleep(interval.min(timeout - elapsed));
        }
    }
}

impl Drop for ResponseFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed response file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {e}", self.path.display()),
        }
    }
}
