//! Orchestrate one poll cycle: sync, detect change, cluster, publish.

use crate::ScoreboardReport;
use crate::cluster::assign_ranks;
use crate::config::ScoreboardConfig;
use crate::refresh::RefreshState;
use crate::render;
use crate::sync::TreeSynchronizer;
use crate::tree::DirectoryProvider;
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

/// What one poll cycle did. Every variant except `Refreshed` leaves the
/// refresh state untouched so the work is retried on a later cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The tree moved; a new scoreboard was computed and written out.
    Refreshed,
    /// The tree is at the already-published marker; nothing recomputed.
    Unchanged,
    /// Synchronization failed; treated as "no change".
    SyncFailed,
    /// The scoreboard was computed but could not be written.
    WriteFailed,
}

/// Build a fresh report from whatever is on disk right now.
///
/// Discovers users and test cases, runs the clustering engine once per test
/// case over the full user list, and assembles the complete rank matrix.
/// The matrix always has exactly |users| rows of |testcases| entries; no
/// state is carried over from earlier cycles.
///
/// # Errors
///
/// Returns an error if the user or test-case roots cannot be listed.
pub fn build_report(tree: &impl DirectoryProvider, title: &str) -> Result<ScoreboardReport> {
    let users = tree.users()?;
    let testcases = tree.testcases()?;

    // Cluster per test case, then transpose into user-major rows.
    let mut results = vec![Vec::with_capacity(testcases.len()); users.len()];
    for testcase in &testcases {
        let ranks = assign_ranks(tree, testcase, &users);
        for (row, rank) in results.iter_mut().zip(ranks) {
            row.push(rank);
        }
    }

    Ok(ScoreboardReport {
        title: title.to_string(),
        generated_at: Utc::now(),
        testcases,
        users,
        results,
    })
}

/// Run one full cycle against the given collaborators.
///
/// Fail-soft by design: a sync failure or an unwritable output path is
/// logged and reported in the outcome, never propagated, so the poll loop
/// survives. The marker is recorded only after a successful write — a failed
/// write leaves the state alone and the next cycle recomputes.
///
/// # Errors
///
/// Returns an error only if the synchronized tree itself cannot be
/// enumerated after a successful sync, which means the checkout layout does
/// not match the configuration.
pub fn run_cycle(
    state: &mut RefreshState,
    synchronizer: &mut impl TreeSynchronizer,
    tree: &impl DirectoryProvider,
    config: &ScoreboardConfig,
) -> Result<CycleOutcome> {
    let outcome = match synchronizer.sync() {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Synchronization failed, retrying next cycle: {e:#}");
            return Ok(CycleOutcome::SyncFailed);
        }
    };

    if outcome.fresh_checkout {
        state.reset();
    }

    if !state.should_refresh(&outcome.marker) {
        return Ok(CycleOutcome::Unchanged);
    }

    let report = build_report(tree, &config.title)?;
    let html = render::render_document(&report, &config.colors);
    if let Err(e) = render::write_document(&html, &config.output_file) {
        warn!("Could not publish scoreboard, retrying next cycle: {e:#}");
        return Ok(CycleOutcome::WriteFailed);
    }

    state.record_refreshed(&outcome.marker);
    info!(
        "Published scoreboard at {} ({} users, {} test cases)",
        outcome.marker,
        report.users.len(),
        report.testcases.len()
    );
    Ok(CycleOutcome::Refreshed)
}
