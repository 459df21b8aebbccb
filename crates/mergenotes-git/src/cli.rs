// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git command-line wrapper
//!
//! Every operation runs the `git` executable synchronously and fails on the
//! first non-zero exit status. Commands are logged at `info` before they run.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::GitError;
use crate::log::MergeLog;

/// Start-of-day form handed to `--since`
///
/// git fills a bare date with the current wall-clock time, so both bounds
/// carry an explicit time to keep the first and last day whole.
const SINCE_FORMAT: &str = "%Y-%m-%d 00:00:00";

/// End-of-day form handed to `--until`
const UNTIL_FORMAT: &str = "%Y-%m-%d 23:59:59";

/// Configuration for a merge-log query
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Only include commits from the start of this day
    pub since: Option<NaiveDate>,
    /// Only include commits up to the end of this day
    pub until: Option<NaiveDate>,
    /// Value passed to `--date=` (git's own format names)
    pub date_format: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            since: None,
            until: None,
            date_format: "short".to_string(),
        }
    }
}

impl LogOptions {
    /// Options for a merge-only log with short dates
    #[must_use]
    pub fn merges() -> Self {
        Self::default()
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Arguments for `git log`, without the leading `log`
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["--merges".to_string()];
        if let Some(since) = self.since {
            args.push(format!("--since={}", since.format(SINCE_FORMAT)));
        }
        if let Some(until) = self.until {
            args.push(format!("--until={}", until.format(UNTIL_FORMAT)));
        }
        args.push(format!("--date={}", self.date_format));
        args
    }
}

/// Handle on the `git` executable
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl Git {
    /// Use `git` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Clone `url` into `dest`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git cannot be started or the clone fails.
    pub fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        self.run(
            None,
            [OsStr::new("clone"), OsStr::new(url), dest.as_os_str()],
        )?;
        Ok(())
    }

    /// Check out `branch` in the working tree at `workdir`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the branch cannot be checked out.
    pub fn checkout(&self, workdir: &Path, branch: &str) -> Result<(), GitError> {
        self.run(Some(workdir), ["checkout", branch])?;
        Ok(())
    }

    /// Pull the current branch in `workdir` from its upstream
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the pull fails.
    pub fn pull(&self, workdir: &Path) -> Result<(), GitError> {
        self.run(Some(workdir), ["pull"])?;
        Ok(())
    }

    /// Run a merge-only `git log` in `workdir` and capture its output
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git log` fails (for example outside a repository).
    pub fn merge_log(&self, workdir: &Path, options: &LogOptions) -> Result<MergeLog, GitError> {
        let mut args = vec!["log".to_string()];
        args.extend(options.to_args());
        let output = self.run(Some(workdir), &args)?;
        let log = MergeLog::new(output);
        debug!(
            workdir = %workdir.display(),
            merges = log.merge_count(),
            "Captured merge log"
        );
        Ok(log)
    }

    /// Run git with `args`, returning stdout on success
    fn run<I, S>(&self, workdir: Option<&Path>, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command = self.describe(workdir, &args);
        info!("{command}");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Human-readable command line, `cd <dir> && git ...` style
    fn describe(&self, workdir: Option<&Path>, args: &[OsString]) -> String {
        let mut line = String::new();
        if let Some(dir) = workdir {
            line.push_str(&format!("cd {} && ", dir.display()));
        }
        line.push_str(&self.program.display().to_string());
        for arg in args {
            line.push(' ');
            line.push_str(&redact_userinfo(&arg.to_string_lossy()));
        }
        line
    }
}

/// Mask the `user:password@` part of a URL so credentials never reach logs
///
/// Anything without a `scheme://` prefix (including scp-style
/// `git@host:path`) is returned unchanged.
fn redact_userinfo(arg: &str) -> Cow<'_, str> {
    let Some(scheme_end) = arg.find("://").map(|i| i + 3) else {
        return Cow::Borrowed(arg);
    };
    let rest = &arg[scheme_end..];
    let authority = rest.split('/').next().unwrap_or_default();
    match authority.rfind('@') {
        Some(at) => Cow::Owned(format!(
            "{}***{}",
            &arg[..scheme_end],
            &rest[at..]
        )),
        None => Cow::Borrowed(arg),
    }
}
