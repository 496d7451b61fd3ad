//! Keep the local checkout of the submissions repository up to date.

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// The result of one synchronization: the tree's current version marker and
/// whether the checkout was created from scratch (in which case the caller
/// must forget its last-published marker and force a refresh).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub marker: String,
    pub fresh_checkout: bool,
}

/// Brings the tracked tree up to date and reports its version marker.
///
/// Injectable so refresh cycles can be tested without a real repository.
pub trait TreeSynchronizer {
    /// Synchronize and return the outcome. On error the caller must treat
    /// the cycle as "no change" and retry next cycle.
    fn sync(&mut self) -> Result<SyncOutcome>;
}

/// Synchronizes by shelling out to `git`: pull when a checkout exists,
/// clone otherwise, and discard-and-reclone when the pull is rejected.
#[derive(Debug, Clone)]
pub struct GitSynchronizer {
    remote: String,
    checkout_dir: PathBuf,
}

impl GitSynchronizer {
    pub fn new(remote: impl Into<String>, checkout_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote: remote.into(),
            checkout_dir: checkout_dir.into(),
        }
    }

    fn clone_checkout(&self) -> Result<()> {
        info!(
            "Cloning {} into {}",
            self.remote,
            self.checkout_dir.display()
        );
        let status = Command::new("git")
            .arg("clone")
            .arg(&self.remote)
            .arg(&self.checkout_dir)
            .status()
            .context("Failed to run git clone")?;
        if !status.success() {
            return Err(anyhow!("git clone of {} failed: {status}", self.remote));
        }
        Ok(())
    }

    fn pull_checkout(&self) -> Result<()> {
        let status = Command::new("git")
            .arg("pull")
            .current_dir(&self.checkout_dir)
            .status()
            .context("Failed to run git pull")?;
        if !status.success() {
            return Err(anyhow!("git pull failed: {status}"));
        }
        Ok(())
    }

    fn head_marker(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(&self.checkout_dir)
            .output()
            .context("Failed to run git rev-parse")?;
        if !output.status.success() {
            return Err(anyhow!("git rev-parse HEAD failed: {}", output.status));
        }
        let marker = String::from_utf8(output.stdout)
            .context("git rev-parse produced non-UTF8 output")?
            .trim()
            .to_string();
        if marker.is_empty() {
            return Err(anyhow!("git rev-parse HEAD produced no output"));
        }
        Ok(marker)
    }
}

impl TreeSynchronizer for GitSynchronizer {
    fn sync(&mut self) -> Result<SyncOutcome> {
        let mut fresh_checkout = false;

        if self.checkout_dir.is_dir() {
            if let Err(e) = self.pull_checkout() {
                // A rejected pull usually means a force-push or a corrupted
                // checkout. Start over from a clean clone.
                warn!(
                    "Pull failed ({e}), discarding {} and recloning",
                    self.checkout_dir.display()
                );
                fs::remove_dir_all(&self.checkout_dir).with_context(|| {
                    format!("Failed to remove checkout {}", self.checkout_dir.display())
                })?;
                self.clone_checkout()?;
                fresh_checkout = true;
            }
        } else {
            self.clone_checkout()?;
            fresh_checkout = true;
        }

        Ok(SyncOutcome {
            marker: self.head_marker()?,
            fresh_checkout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_sync_outcome_equality() {
        let a = SyncOutcome {
            marker: "abc123".to_string(),
            fresh_checkout: false,
        };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test_log::test]
    fn test_missing_checkout_without_git_remote_fails() {
        // No git server involved: cloning a nonexistent remote must surface
        // an error instead of pretending the tree is unchanged.
        let dir = tempfile::TempDir::new().unwrap();
        let mut sync = GitSynchronizer::new(
            dir.path().join("no-such-remote").display().to_string(),
            dir.path().join("checkout"),
        );
        assert!(sync.sync().is_err());
    }
}
