// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Merge-log extraction

use mergenotes_git::{Git, GitError, LogOptions, MergeLog, RepoRef};
use tracing::info;

use crate::range::DateRange;
use crate::sync::Checkout;

/// Merge logs for every repository, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSet {
    entries: Vec<(RepoRef, MergeLog)>,
}

impl LogSet {
    /// An empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the log for `repo`
    pub fn push(&mut self, repo: RepoRef, log: MergeLog) {
        self.entries.push((repo, log));
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&RepoRef, &MergeLog)> {
        self.entries.iter().map(|(repo, log)| (repo, log))
    }

    /// Number of repositories
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no repositories were processed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RepoRef, MergeLog)> for LogSet {
    fn from_iter<I: IntoIterator<Item = (RepoRef, MergeLog)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Run the merge-log query for every checkout
///
/// # Errors
///
/// Returns the first `GitError`; a failed `git log` aborts extraction.
pub fn extract_logs(
    git: &Git,
    checkouts: &[Checkout],
    range: &DateRange,
) -> Result<LogSet, GitError> {
    let options = LogOptions::merges()
        .since(range.since())
        .until(range.until());

    let mut logs = LogSet::new();
    for checkout in checkouts {
        let log = git.merge_log(&checkout.path, &options)?;
        info!(
            repo = checkout.repo.name(),
            merges = log.merge_count(),
            "Extracted merge log"
        );
        logs.push(checkout.repo.clone(), log);
    }
    Ok(logs)
}
