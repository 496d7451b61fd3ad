//! Load and validate the scoreboard configuration file.

use crate::DEFAULT_REFRESH_INTERVAL_SECS;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the daemon needs, read once at startup from a JSON file.
/// A missing or malformed file is fatal: there is no useful default for the
/// remote, the output path or the palette.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreboardConfig {
    /// Shown in the page title and the table caption.
    pub title: String,

    /// Where the submissions repository lives (anything `git clone` takes).
    pub repo_remote: String,

    /// Path of the `input`/`output` roots inside the checkout, relative to
    /// its top level. Empty means they sit at the top level.
    #[serde(default)]
    pub repo_subdir: String,

    /// Where to write the rendered scoreboard.
    pub output_file: PathBuf,

    /// Rank palette: `colors[0]` is the no-artifact cell (keep it unfilled),
    /// ranks 1.. cycle through the rest.
    pub colors: Vec<String>,

    /// Seconds to sleep between poll cycles.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Where to clone the repository. Defaults to the repository's name in
    /// the current working directory.
    #[serde(default)]
    pub sync_root: Option<PathBuf>,
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl ScoreboardConfig {
    /// Read and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// the palette has fewer than two colors (one for "no artifact" plus at
    /// least one for real ranks).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if config.colors.len() < 2 {
            return Err(anyhow!(
                "Config needs at least 2 colors (no-artifact color plus one rank color), got {}",
                config.colors.len()
            ));
        }

        Ok(config)
    }

    /// The directory the repository is cloned into.
    pub fn checkout_dir(&self) -> PathBuf {
        match &self.sync_root {
            Some(root) => root.clone(),
            None => PathBuf::from(repo_name_from_remote(&self.repo_remote)),
        }
    }

    /// The directory containing the `input` and `output` roots.
    pub fn data_root(&self) -> PathBuf {
        let checkout = self.checkout_dir();
        if self.repo_subdir.is_empty() {
            checkout
        } else {
            checkout.join(self.repo_subdir.trim_start_matches('/'))
        }
    }
}

/// Derive a checkout directory name from a remote location, the way git
/// itself names a fresh clone: the last path component, minus any `.git`.
/// Works for both URL and scp-style remotes.
fn repo_name_from_remote(remote: &str) -> String {
    let trimmed = remote.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.trim_end_matches(".git").to_string()
}
