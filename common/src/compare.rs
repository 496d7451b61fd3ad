//! Decide whether two output artifacts are equivalent.

use log::warn;
use std::fs;
use std::path::Path;

/// Report whether two artifacts have byte-identical content.
///
/// Equivalence is strict whole-content equality: no trimming, no line-ending
/// normalization. An unreadable artifact is never equivalent to anything —
/// one corrupt file must not take down the whole refresh, so read errors are
/// logged and reported as a non-match.
pub fn artifacts_equivalent(a: &Path, b: &Path) -> bool {
    let content_a = match fs::read(a) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read artifact {}: {e}", a.display());
            return false;
        }
    };
    let content_b = match fs::read(b) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read artifact {}: {e}", b.display());
            return false;
        }
    };
    content_a == content_b
}
