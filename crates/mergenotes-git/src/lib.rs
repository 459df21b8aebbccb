// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! mergenotes-git: Git checkout and merge-log extraction for mergenotes
//!
//! This library crate wraps the `git` executable to clone and update
//! repositories and to collect merge-commit history for a date window.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use mergenotes_git::{Git, LogOptions, RepoRef};
//!
//! let repo = RepoRef::parse("https://example.com/org/service.git").expect("valid url");
//! let git = Git::new();
//! let checkout = std::path::Path::new("repos").join(repo.name());
//! git.clone_repo(repo.url(), &checkout).expect("clone");
//!
//! let since = NaiveDate::from_ymd_opt(2024, 2, 1).expect("date");
//! let until = NaiveDate::from_ymd_opt(2024, 2, 29).expect("date");
//! let log = git
//!     .merge_log(&checkout, &LogOptions::merges().since(since).until(until))
//!     .expect("git log");
//! println!("{} merges in {}", log.merge_count(), repo.name());
//! ```

pub mod cli;
pub mod error;
pub mod log;
pub mod repo;

pub use cli::{Git, LogOptions};
pub use error::GitError;
pub use log::MergeLog;
pub use repo::RepoRef;
