// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository references and short-name derivation

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::GitError;

/// A remote repository location together with its derived short name
///
/// The short name is the final path segment of the location with a trailing
/// `.git` removed. It identifies the repository everywhere else: as the
/// checkout directory name and as the prefix of release-note files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    url: String,
    name: String,
}

impl RepoRef {
    /// Parse a repository location and derive its short name
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidLocation` if no non-empty name can be derived
    /// (for example `""`, `"/"` or `".git"`).
    pub fn parse(url: impl Into<String>) -> Result<Self, GitError> {
        let url = url.into();
        let name = Self::short_name(&url).ok_or_else(|| GitError::InvalidLocation {
            url: url.clone(),
        })?;
        Ok(Self { url, name })
    }

    /// Derive the short name of a repository location
    ///
    /// Takes the last `/`-separated segment (a `:` also separates, so
    /// scp-style `git@host:repo.git` works), ignoring trailing slashes, and
    /// strips one `.git` suffix.
    #[must_use]
    pub fn short_name(url: &str) -> Option<String> {
        let trimmed = url.trim().trim_end_matches('/');
        let segment = trimmed
            .rsplit(|c: char| c == '/' || c == ':')
            .next()
            .unwrap_or(trimmed);
        let name = segment.strip_suffix(".git").unwrap_or(segment);
        match name {
            "" | "." | ".." => None,
            _ => Some(name.to_string()),
        }
    }

    /// The location as given (URL or local path)
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The short name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checkout directory for this repository under `root`
    #[must_use]
    pub fn checkout_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
