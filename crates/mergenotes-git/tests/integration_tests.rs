// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for mergenotes-git
//!
//! These tests build throwaway repositories with the git CLI, with pinned
//! author and committer dates so date-window queries are deterministic.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use mergenotes_git::{Git, GitError, LogOptions, RepoRef};
use similar_asserts::assert_eq;

/// Run git in `dir` with a fixed identity and commit date
fn git_at(dir: &Path, date: &str, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .expect("run git");
    assert!(status.success(), "git {args:?} failed");
}

fn commit_file(dir: &Path, date: &str, file: &str, message: &str) {
    fs::write(dir.join(file), format!("{message}\n")).expect("write file");
    git_at(dir, date, &["add", "."]);
    git_at(dir, date, &["commit", "-m", message]);
}

/// Create a feature branch, commit on it, and merge it into main with --no-ff
fn merge_feature(dir: &Path, date: &str, branch: &str, pr: u32) {
    git_at(dir, date, &["checkout", "-b", branch]);
    commit_file(dir, date, &format!("{branch}.txt"), &format!("work on {branch}"));
    git_at(dir, date, &["checkout", "main"]);
    let message = format!("Merge pull request #{pr} from org/{branch}");
    git_at(dir, date, &["merge", "--no-ff", branch, "-m", &message]);
}

/// An "origin" repository with merges on 2024-02-14 (#1) and 2024-03-05 (#2)
fn origin_repo(root: &Path) -> PathBuf {
    let origin = root.join("origin");
    fs::create_dir_all(&origin).expect("create origin");
    git_at(
        &origin,
        "2024-01-10 12:00:00 +0000",
        &["-c", "init.defaultBranch=main", "init"],
    );
    commit_file(&origin, "2024-01-10 12:00:00 +0000", "README.md", "initial");
    merge_feature(&origin, "2024-02-14 12:00:00 +0000", "feature-login", 1);
    merge_feature(&origin, "2024-03-05 12:00:00 +0000", "fix-crash", 2);
    origin
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_merge_log_filters_by_date_window() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = origin_repo(dir.path());

    let options = LogOptions::merges()
        .since(date(2024, 2, 1))
        .until(date(2024, 2, 29));
    let log = Git::new().merge_log(&origin, &options).expect("git log");

    assert!(!log.is_empty());
    assert_eq!(log.merge_count(), 1);
    assert!(log.as_str().contains("Merge pull request #1"));
    assert!(!log.as_str().contains("Merge pull request #2"));
    assert!(log.as_str().contains("Date:   2024-02-14"));
}

#[test]
fn test_merge_log_excludes_plain_commits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = origin_repo(dir.path());

    let log = Git::new()
        .merge_log(&origin, &LogOptions::merges())
        .expect("git log");

    assert_eq!(log.merge_count(), 2);
    assert!(!log.as_str().contains("    initial"));
}

#[test]
fn test_merge_log_empty_window() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = origin_repo(dir.path());

    let options = LogOptions::merges()
        .since(date(2023, 6, 1))
        .until(date(2023, 6, 30));
    let log = Git::new().merge_log(&origin, &options).expect("git log");

    assert!(log.is_empty());
    assert_eq!(log.merge_count(), 0);
}

/// Merges a few seconds either side of the February 2024 boundaries
///
/// Dates carry no offset so git reads them in the same local zone it uses
/// for `--since`/`--until`.
fn boundary_repo(root: &Path) -> PathBuf {
    let origin = root.join("boundary");
    fs::create_dir_all(&origin).expect("create origin");
    git_at(
        &origin,
        "2024-01-10 12:00:00",
        &["-c", "init.defaultBranch=main", "init"],
    );
    commit_file(&origin, "2024-01-10 12:00:00", "README.md", "initial");
    merge_feature(&origin, "2024-01-31 23:59:30", "before-start", 10);
    merge_feature(&origin, "2024-02-01 00:00:30", "first-day", 11);
    merge_feature(&origin, "2024-02-29 23:59:30", "last-day", 12);
    merge_feature(&origin, "2024-03-01 00:00:30", "after-end", 13);
    origin
}

#[test]
fn test_merge_log_includes_whole_first_and_last_day() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = boundary_repo(dir.path());

    let options = LogOptions::merges()
        .since(date(2024, 2, 1))
        .until(date(2024, 2, 29));
    let log = Git::new().merge_log(&origin, &options).expect("git log");

    assert_eq!(log.merge_count(), 2);
    assert!(log.as_str().contains("Merge pull request #11"));
    assert!(log.as_str().contains("Merge pull request #12"));
    assert!(!log.as_str().contains("Merge pull request #10"));
    assert!(!log.as_str().contains("Merge pull request #13"));
}

#[test]
fn test_clone_checkout_and_pull() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = origin_repo(dir.path());
    let repo = RepoRef::parse(origin.display().to_string()).expect("repo ref");
    assert_eq!(repo.name(), "origin");

    let checkout = repo.checkout_dir(&dir.path().join("repos"));
    let git = Git::new();
    git.clone_repo(repo.url(), &checkout).expect("clone");
    assert!(checkout.join("README.md").exists());

    git.checkout(&checkout, "main").expect("checkout");

    // New merge upstream becomes visible after a pull
    merge_feature(&origin, "2024-03-20 12:00:00 +0000", "feature-export", 3);
    git.pull(&checkout).expect("pull");

    let options = LogOptions::merges()
        .since(date(2024, 3, 1))
        .until(date(2024, 3, 31));
    let log = git.merge_log(&checkout, &options).expect("git log");
    assert_eq!(log.merge_count(), 2);
    assert!(log.as_str().contains("Merge pull request #3"));
}

#[test]
fn test_checkout_missing_branch_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let origin = origin_repo(dir.path());

    let result = Git::new().checkout(&origin, "does-not-exist");
    match result {
        Err(GitError::CommandFailed { command, stderr, .. }) => {
            assert!(command.contains("checkout does-not-exist"));
            assert!(!stderr.is_empty());
        }
        other => panic!("Expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn test_clone_missing_source_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-repo");
    let dest = dir.path().join("repos").join("no-such-repo");

    let result = Git::new().clone_repo(&missing.display().to_string(), &dest);
    assert!(matches!(result, Err(GitError::CommandFailed { .. })));
}
