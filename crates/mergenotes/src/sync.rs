// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository sync
//!
//! Clones missing checkouts, then (unless skipped) checks out the configured
//! branch and pulls in every checkout. The first failing git command aborts
//! the sync; checkouts created before the failure are left in place.

use std::path::PathBuf;

use mergenotes_git::{Git, GitError, RepoRef};
use tracing::debug;

/// Options for [`sync_repositories`]
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding one checkout per repository
    pub root: PathBuf,
    /// Branch to check out before pulling
    pub branch: String,
    /// Check out and pull every checkout after cloning
    pub update: bool,
}

/// A local checkout of a configured repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// The repository
    pub repo: RepoRef,
    /// Working tree location
    pub path: PathBuf,
    /// True if this run created the checkout
    pub cloned: bool,
}

/// Ensure a checkout exists for every repository and optionally update it
///
/// # Errors
///
/// Returns the first `GitError` from clone, checkout or pull.
pub fn sync_repositories(
    git: &Git,
    repos: &[RepoRef],
    options: &SyncOptions,
) -> Result<Vec<Checkout>, GitError> {
    let mut checkouts = Vec::with_capacity(repos.len());

    for repo in repos {
        let path = repo.checkout_dir(&options.root);
        let cloned = if path.exists() {
            debug!(repo = repo.name(), path = %path.display(), "Checkout exists");
            false
        } else {
            git.clone_repo(repo.url(), &path)?;
            true
        };
        checkouts.push(Checkout {
            repo: repo.clone(),
            path,
            cloned,
        });
    }

    if options.update {
        for checkout in &checkouts {
            git.checkout(&checkout.path, &options.branch)?;
            git.pull(&checkout.path)?;
        }
    }

    Ok(checkouts)
}
