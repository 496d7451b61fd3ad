//! Track the last rendered version of the synchronized tree.

/// The one piece of state that survives between poll cycles: the version
/// marker of the tree as of the last successfully published scoreboard.
///
/// Owned by the caller and passed into each cycle, so tests can drive
/// refresh decisions without a timer or a checkout.
#[derive(Debug, Clone, Default)]
pub struct RefreshState {
    last_marker: Option<String>,
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the scoreboard must be recomputed: either nothing has been
    /// published yet (first run, or after a forced re-clone) or the tree has
    /// moved since the last publish.
    pub fn should_refresh(&self, current_marker: &str) -> bool {
        match &self.last_marker {
            None => true,
            Some(last) => last != current_marker,
        }
    }

    /// Record a successful publish at this marker.
    pub fn record_refreshed(&mut self, marker: &str) {
        self.last_marker = Some(marker.to_string());
    }

    /// Forget the last publish so the next check unconditionally refreshes.
    /// Used when the checkout was discarded and re-cloned.
    pub fn reset(&mut self) {
        self.last_marker = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_first_check_always_refreshes() {
        let state = RefreshState::new();
        assert!(state.should_refresh("abc123"));
    }

    #[test_log::test]
    fn test_same_marker_after_record_is_a_noop() {
        let mut state = RefreshState::new();
        assert!(state.should_refresh("abc123"));
        state.record_refreshed("abc123");
        assert!(!state.should_refresh("abc123"));
    }

    #[test_log::test]
    fn test_new_marker_refreshes() {
        let mut state = RefreshState::new();
        state.record_refreshed("abc123");
        assert!(state.should_refresh("def456"));
    }

    #[test_log::test]
    fn test_reset_forces_refresh() {
        let mut state = RefreshState::new();
        state.record_refreshed("abc123");
        state.reset();
        assert!(state.should_refresh("abc123"));
    }
}
