//! A library for building scoreboards ranked by mutual agreement.
//!
//! Users are grouped per test case by byte-identical output, each group gets
//! a rank in order of first discovery, and the grid of ranks is rendered as
//! an HTML table. There is no golden answer: agreement is the score.

pub mod cluster;
pub mod compare;
pub mod config;
pub mod refresh;
pub mod render;
pub mod scoreboard;
pub mod sync;
pub mod tree;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long to wait between poll cycles unless configured otherwise.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// A user's equivalence class for one test case.
/// 1-based in order of first discovery; 0 means no artifact was submitted.
pub type Rank = u32;

/// Everything the renderer needs for one scoreboard: the discovered users
/// and test cases plus the full |users| x |testcases| rank matrix.
/// Rebuilt wholesale every refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub testcases: Vec<String>,
    pub users: Vec<String>,
    /// `results[user_idx][testcase_idx]`, same order as `users`/`testcases`.
    pub results: Vec<Vec<Rank>>,
}
