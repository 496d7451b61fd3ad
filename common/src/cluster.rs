//! Partition users into equivalence classes for one test case.

use crate::Rank;
use crate::compare::artifacts_equivalent;
use crate::tree::DirectoryProvider;
use log::debug;
use std::path::PathBuf;

/// Assign every user a rank for one test case.
///
/// The pool holds one representative artifact per class, in order of
/// discovery. Users are scanned in the order given; a user without an
/// artifact gets rank 0 and never enters the pool. Otherwise the pool is
/// scanned from earliest to latest and the first equivalent representative
/// wins, so a user always joins the earliest-discovered compatible class.
/// With no match the user becomes a new representative and takes the next
/// rank.
///
/// Worst case is O(U^2) content comparisons, which is fine at classroom
/// scale and runs at most once per refresh. Comparisons stay sequential so
/// the first-match tie-break is trivially deterministic.
pub fn assign_ranks(
    tree: &impl DirectoryProvider,
    testcase: &str,
    users: &[String],
) -> Vec<Rank> {
    let mut pool: Vec<PathBuf> = Vec::new();
    let mut ranks = vec![0; users.len()];

    for (user_idx, user) in users.iter().enumerate() {
        let Some(artifact) = tree.artifact_path(user, testcase) else {
            debug!("No artifact from {user} for {testcase}, rank 0");
            continue;
        };

        let slot = pool
            .iter()
            .position(|representative| artifacts_equivalent(representative, &artifact));

        ranks[user_idx] = match slot {
            Some(slot) => (slot + 1) as Rank,
            None => {
                pool.push(artifact);
                pool.len() as Rank
            }
        };
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SubmissionTree;
    use std::fs;
    use tempfile::TempDir;

    fn write_artifact(dir: &TempDir, user: &str, testcase: &str, content: &str) {
        let user_dir = dir.path().join("output").join(user);
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join(testcase), content).unwrap();
    }

    fn add_user(dir: &TempDir, user: &str) {
        fs::create_dir_all(dir.path().join("output").join(user)).unwrap();
    }

    fn names(users: &[&str]) -> Vec<String> {
        users.iter().map(ToString::to_string).collect()
    }

    #[test_log::test]
    fn test_agreement_and_absence() {
        // alice and bob agree, carol differs, dave never submitted
        let dir = TempDir::new().unwrap();
        write_artifact(&dir, "alice", "t1", "4\n");
        write_artifact(&dir, "bob", "t1", "4\n");
        write_artifact(&dir, "carol", "t1", "5\n");
        add_user(&dir, "dave");
        let tree = SubmissionTree::new(dir.path());

        let users = names(&["alice", "bob", "carol", "dave"]);
        assert_eq!(assign_ranks(&tree, "t1", &users), vec![1, 1, 2, 0]);
    }

    #[test_log::test]
    fn test_tiebreak_joins_earliest_class() {
        // A and C agree; C must land on A's class even though B came between
        let dir = TempDir::new().unwrap();
        write_artifact(&dir, "a", "t1", "same\n");
        write_artifact(&dir, "b", "t1", "other\n");
        write_artifact(&dir, "c", "t1", "same\n");
        let tree = SubmissionTree::new(dir.path());

        let users = names(&["a", "b", "c"]);
        assert_eq!(assign_ranks(&tree, "t1", &users), vec![1, 2, 1]);
    }

    #[test_log::test]
    fn test_scan_order_defines_ranks() {
        let dir = TempDir::new().unwrap();
        write_artifact(&dir, "a", "t1", "x\n");
        write_artifact(&dir, "b", "t1", "y\n");
        let tree = SubmissionTree::new(dir.path());

        assert_eq!(assign_ranks(&tree, "t1", &names(&["a", "b"])), vec![1, 2]);
        assert_eq!(assign_ranks(&tree, "t1", &names(&["b", "a"])), vec![1, 2]);
    }

    #[test_log::test]
    fn test_all_distinct_get_strictly_increasing_ranks() {
        let dir = TempDir::new().unwrap();
        write_artifact(&dir, "a", "t1", "1\n");
        write_artifact(&dir, "b", "t1", "2\n");
        write_artifact(&dir, "c", "t1", "3\n");
        let tree = SubmissionTree::new(dir.path());

        let users = names(&["a", "b", "c"]);
        assert_eq!(assign_ranks(&tree, "t1", &users), vec![1, 2, 3]);
    }

    #[test_log::test]
    fn test_no_artifacts_at_all() {
        let dir = TempDir::new().unwrap();
        add_user(&dir, "a");
        add_user(&dir, "b");
        let tree = SubmissionTree::new(dir.path());

        let users = names(&["a", "b"]);
        assert_eq!(assign_ranks(&tree, "t1", &users), vec![0, 0]);
    }

    #[test_log::test]
    fn test_deterministic_across_invocations() {
        let dir = TempDir::new().unwrap();
        write_artifact(&dir, "a", "t1", "4\n");
        write_artifact(&dir, "b", "t1", "5\n");
        write_artifact(&dir, "c", "t1", "4\n");
        add_user(&dir, "d");
        let tree = SubmissionTree::new(dir.path());

        let users = names(&["a", "b", "c", "d"]);
        let first = assign_ranks(&tree, "t1", &users);
        let second = assign_ranks(&tree, "t1", &users);
        assert_eq!(first, second);
    }
}
