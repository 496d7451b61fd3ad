//! Enumerate users, test cases and artifacts in the synchronized checkout.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of users, test cases and their artifacts.
///
/// Injectable so the clustering engine and the refresh cycle can be driven
/// from a fixture tree in tests. Both listings must return names in a stable
/// discovery order: the order defines which equivalence class is found first,
/// which is visible on the rendered board.
pub trait DirectoryProvider {
    /// The users who have submitted anything, in discovery order.
    fn users(&self) -> Result<Vec<String>>;

    /// The known test cases, in discovery order.
    fn testcases(&self) -> Result<Vec<String>>;

    /// The path to a user's output for one test case, or `None` if the user
    /// never produced one.
    fn artifact_path(&self, user: &str, testcase: &str) -> Option<PathBuf>;
}

/// The on-disk layout the synchronized repository uses: one directory per
/// user under `<root>/output`, one directory per test case under
/// `<root>/input`, and `<root>/output/<user>/<testcase>` as the artifact.
#[derive(Debug, Clone)]
pub struct SubmissionTree {
    root: PathBuf,
}

impl SubmissionTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// List the subdirectory names of `dir` in the order the filesystem
    /// yields them. Plain files are ignored. Deliberately not sorted: the
    /// discovery order is part of the scoreboard's observable behavior.
    fn list_subdirs(dir: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list directory {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read an entry of {}", dir.display()))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

impl DirectoryProvider for SubmissionTree {
    fn users(&self) -> Result<Vec<String>> {
        Self::list_subdirs(&self.root.join("output"))
    }

    fn testcases(&self) -> Result<Vec<String>> {
        Self::list_subdirs(&self.root.join("input"))
    }

    fn artifact_path(&self, user: &str, testcase: &str) -> Option<PathBuf> {
        let path = self.root.join("output").join(user).join(testcase);
        if path.is_file() { Some(path) } else { None }
    }
}
