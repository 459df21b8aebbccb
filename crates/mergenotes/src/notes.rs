// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Release-note generation
//!
//! Each repository's merge log is either summarized and saved, or printed
//! raw. Repositories are processed one at a time in configuration order.
//! A summarization failure is logged and only affects that repository.

use std::io::Write;
use std::path::{Path, PathBuf};

use mergenotes_ai::{Summarizer, user_message};
use tracing::{error, info, warn};

use crate::extract::LogSet;
use crate::range::DateRange;

/// How notes are produced
#[derive(Clone, Copy)]
pub enum NoteMode<'a> {
    /// Summarize each log and save the result
    Summarize(&'a dyn Summarizer),
    /// Print each log without calling the service
    Raw,
}

impl std::fmt::Debug for NoteMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summarize(_) => f.write_str("Summarize"),
            Self::Raw => f.write_str("Raw"),
        }
    }
}

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
    /// Summary written to this file
    Saved(PathBuf),
    /// Raw log printed
    Printed,
    /// No merges in range
    Skipped,
    /// Summarization or saving failed
    Failed(String),
}

/// Per-repository outcomes, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteReport {
    /// `(repository name, outcome)` pairs
    pub entries: Vec<(String, NoteOutcome)>,
}

impl NoteReport {
    /// Outcome for one repository
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&NoteOutcome> {
        self.entries
            .iter()
            .find(|(repo, _)| repo == name)
            .map(|(_, outcome)| outcome)
    }

    /// Paths of saved notes
    #[must_use]
    pub fn saved(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                NoteOutcome::Saved(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Number of failed repositories
    #[must_use]
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, NoteOutcome::Failed(_)))
            .count()
    }
}

/// Directory of `{repo}_{since}_{until}.md` files
#[derive(Debug, Clone)]
pub struct ReleaseNoteStore {
    dir: PathBuf,
}

impl ReleaseNoteStore {
    /// Store notes under `dir` (created on first save)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a repository and range
    #[must_use]
    pub fn file_name(repo: &str, range: &DateRange) -> String {
        format!("{repo}_{}_{}.md", range.since_str(), range.until_str())
    }

    /// Full path for a repository and range
    #[must_use]
    pub fn path_for(&self, repo: &str, range: &DateRange) -> PathBuf {
        self.dir.join(Self::file_name(repo, range))
    }

    /// Write a note, replacing any previous file for the same key
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, repo: &str, range: &DateRange, note: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(repo, range);
        std::fs::write(&path, note)?;
        Ok(path)
    }
}

/// Produce notes for every repository in `logs`
///
/// Text for the user (summaries or raw logs) goes to `out`; diagnostics go
/// through `tracing`.
///
/// # Errors
///
/// Returns an I/O error only if writing to `out` fails.
pub async fn generate_notes<W: Write>(
    logs: &LogSet,
    range: &DateRange,
    mode: NoteMode<'_>,
    store: &ReleaseNoteStore,
    out: &mut W,
) -> std::io::Result<NoteReport> {
    let mut report = NoteReport::default();

    for (repo, log) in logs.iter() {
        let name = repo.name();
        if log.is_empty() {
            warn!(repo = name, "Repository {name} has no merge commits in {range}");
            report.entries.push((name.to_string(), NoteOutcome::Skipped));
            continue;
        }

        let outcome = match mode {
            NoteMode::Raw => {
                writeln!(out, "{}\n", user_message(name, log.as_str()))?;
                NoteOutcome::Printed
            }
            NoteMode::Summarize(summarizer) => match summarizer.summarize(name, log.as_str()).await
            {
                Ok(note) => {
                    writeln!(out, "{note}\n")?;
                    match store.save(name, range, &note) {
                        Ok(path) => {
                            info!(repo = name, path = %path.display(), "Saved release note");
                            NoteOutcome::Saved(path)
                        }
                        Err(e) => {
                            error!(repo = name, error = %e, "Failed to save release note");
                            NoteOutcome::Failed(e.to_string())
                        }
                    }
                }
                Err(e) => {
                    error!(repo = name, error = %e, "Failed to summarize merge log");
                    NoteOutcome::Failed(e.to_string())
                }
            },
        };
        report.entries.push((name.to_string(), outcome));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mergenotes_ai::SummarizeError;
    use mergenotes_git::{MergeLog, RepoRef};
    use similar_asserts::assert_eq;

    /// Summarizer that fails for listed repositories and records every call
    #[derive(Default)]
    struct FakeSummarizer {
        fail_for: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, repo: &str, log: &str) -> Result<String, SummarizeError> {
            self.calls.lock().expect("lock").push(repo.to_string());
            if self.fail_for.iter().any(|name| *name == repo) {
                return Err(SummarizeError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(format!("# {repo}\n{}", log.lines().count()))
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("date"),
        )
    }

    fn logs(entries: &[(&str, &str)]) -> LogSet {
        entries
            .iter()
            .map(|(name, text)| {
                (
                    RepoRef::parse(format!("https://example.com/org/{name}.git")).expect("repo"),
                    MergeLog::new(*text),
                )
            })
            .collect()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            ReleaseNoteStore::file_name("api", &range()),
            "api_2024-02-01_2024-02-29.md"
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReleaseNoteStore::new(dir.path().join("notes"));

        let first = store.save("api", &range(), "first").expect("save");
        let second = store.save("api", &range(), "second").expect("save");

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).expect("read"), "second");
        assert_eq!(
            std::fs::read_dir(store.dir()).expect("read dir").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_raw_mode_prints_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReleaseNoteStore::new(dir.path().join("notes"));
        let logs = logs(&[("api", "commit a\n"), ("web", ""), ("cli", "commit b\n")]);
        let mut out = Vec::new();

        let report = generate_notes(&logs, &range(), NoteMode::Raw, &store, &mut out)
            .await
            .expect("generate");

        let printed = String::from_utf8(out).expect("utf8");
        // Each block is followed by a blank line, as summaries are
        assert_eq!(
            printed,
            "Repository: api\n\ncommit a\n\n\n\n\nRepository: cli\n\ncommit b\n\n\n\n\n"
        );
        assert_eq!(report.outcome("api"), Some(&NoteOutcome::Printed));
        assert_eq!(report.outcome("web"), Some(&NoteOutcome::Skipped));
        assert!(report.saved().is_empty());
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_summarize_mode_saves_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReleaseNoteStore::new(dir.path());
        let logs = logs(&[("api", "commit a\nline\n")]);
        let summarizer = FakeSummarizer::default();
        let mut out = Vec::new();

        let report = generate_notes(
            &logs,
            &range(),
            NoteMode::Summarize(&summarizer),
            &store,
            &mut out,
        )
        .await
        .expect("generate");

        let path = dir.path().join("api_2024-02-01_2024-02-29.md");
        assert_eq!(report.outcome("api"), Some(&NoteOutcome::Saved(path.clone())));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "# api\n2");
        assert_eq!(String::from_utf8(out).expect("utf8"), "# api\n2\n\n");
    }

    #[tokio::test]
    async fn test_empty_log_makes_no_call() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReleaseNoteStore::new(dir.path());
        let logs = logs(&[("quiet", "  \n")]);
        let summarizer = FakeSummarizer::default();
        let mut out = Vec::new();

        let report = generate_notes(
            &logs,
            &range(),
            NoteMode::Summarize(&summarizer),
            &store,
            &mut out,
        )
        .await
        .expect("generate");

        assert!(summarizer.calls.lock().expect("lock").is_empty());
        assert_eq!(report.outcome("quiet"), Some(&NoteOutcome::Skipped));
        assert!(out.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_repositories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReleaseNoteStore::new(dir.path());
        let logs = logs(&[
            ("first", "commit a\n"),
            ("broken", "commit b\n"),
            ("last", "commit c\n"),
        ]);
        let summarizer = FakeSummarizer {
            fail_for: vec!["broken"],
            ..Default::default()
        };
        let mut out = Vec::new();

        let report = generate_notes(
            &logs,
            &range(),
            NoteMode::Summarize(&summarizer),
            &store,
            &mut out,
        )
        .await
        .expect("generate");

        assert_eq!(
            *summarizer.calls.lock().expect("lock"),
            vec!["first".to_string(), "broken".to_string(), "last".to_string()]
        );
        assert!(matches!(
            report.outcome("broken"),
            Some(NoteOutcome::Failed(msg)) if msg.contains("boom")
        ));
        assert_eq!(report.failed(), 1);
        assert_eq!(report.saved().len(), 2);
        assert!(dir.path().join("last_2024-02-01_2024-02-29.md").exists());
        assert!(!dir.path().join("broken_2024-02-01_2024-02-29.md").exists());
    }

    #[tokio::test]
    async fn test_save_failure_is_isolated() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A file where the output directory should be
        let blocked = dir.path().join("notes");
        std::fs::write(&blocked, "not a directory").expect("write");
        let store = ReleaseNoteStore::new(&blocked);
        let logs = logs(&[("api", "commit a\n")]);
        let summarizer = FakeSummarizer::default();
        let mut out = Vec::new();

        let report = generate_notes(
            &logs,
            &range(),
            NoteMode::Summarize(&summarizer),
            &store,
            &mut out,
        )
        .await
        .expect("generate");

        assert!(matches!(report.outcome("api"), Some(NoteOutcome::Failed(_))));
    }
}
