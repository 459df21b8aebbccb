//! Configuration for mergenotes
//!
//! This module provides the command-line and environment configuration:
//! date range flags, skip switches, directories, summarization settings and
//! the `REPO_URL_<n>` repository list.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use mergenotes_ai::{PromptTemplate, SummarizeError};
use mergenotes_git::{GitError, RepoRef};

use crate::range::{DateRange, RangeError};

/// Prefix of the numbered repository environment variables
pub const REPO_URL_PREFIX: &str = "REPO_URL_";

/// Default branch checked out and pulled before extraction
pub const DEFAULT_BRANCH: &str = "main";

/// Default output language for summarized notes
pub const DEFAULT_LANGUAGE: &str = "Japanese";

/// Accepted sampling temperatures
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// mergenotes - release notes from merge-commit history
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mergenotes")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// First day of the range, inclusive (YYYY-MM-DD)
    ///
    /// Must be given together with --until. When both are omitted the
    /// previous calendar month is used.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub since: Option<String>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub until: Option<String>,

    /// Skip checking out and pulling the branch in each checkout
    #[arg(long, default_value = "false")]
    pub skip_checkout_pull: bool,

    /// Print raw merge logs instead of calling the summarization service
    #[arg(long, default_value = "false")]
    pub skip_ai: bool,

    /// Directory holding one checkout per repository
    ///
    /// Defaults to ~/.local/share/mergenotes/repos (or platform equivalent).
    #[arg(long, env = "MERGENOTES_REPO_DIR")]
    pub repo_dir: Option<PathBuf>,

    /// Directory receiving `{repo}_{since}_{until}.md` files
    #[arg(long, env = "MERGENOTES_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Branch to check out and pull (default: main)
    #[arg(long, env = "MERGENOTES_BRANCH")]
    pub branch: Option<String>,

    /// API key for the summarization service
    ///
    /// Without a key, raw merge logs are printed even if --skip-ai is absent.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion API
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Model used for summarization
    #[arg(long, env = "MERGENOTES_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0 (service default when omitted)
    #[arg(long, env = "MERGENOTES_TEMPERATURE")]
    pub temperature: Option<f64>,

    /// File replacing the built-in system instruction
    ///
    /// `{language}` in the file is replaced with --language.
    #[arg(long, env = "MERGENOTES_PROMPT_FILE")]
    pub prompt_file: Option<PathBuf>,

    /// Language the release notes are written in (default: Japanese)
    #[arg(long, env = "MERGENOTES_LANGUAGE")]
    pub language: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the checkout directory, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/mergenotes/repos
    /// - Linux: ~/.local/share/mergenotes/repos
    /// - Windows: %LOCALAPPDATA%\mergenotes\repos
    #[must_use]
    pub fn repo_dir(&self) -> PathBuf {
        self.repo_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mergenotes")
                .join("repos")
        })
    }

    /// Get the release-note directory, `./release_notes` by default
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("release_notes"))
    }

    /// Branch to sync
    #[must_use]
    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// Model ID for summarization
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(mergenotes_ai::client::DEFAULT_MODEL)
    }

    /// Base URL of the chat-completion API
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(mergenotes_ai::client::DEFAULT_BASE_URL)
    }

    /// Output language of summarized notes
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// The API key, treating an empty value as absent
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether notes are summarized (key present and --skip-ai not given)
    #[must_use]
    pub fn summarize_enabled(&self) -> bool {
        !self.skip_ai && self.api_key().is_some()
    }

    /// Resolve the date range relative to `today`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Range` for partial or malformed ranges.
    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, ConfigError> {
        Ok(DateRange::resolve(
            self.since.as_deref(),
            self.until.as_deref(),
            today,
        )?)
    }

    /// Load the system-instruction template
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Prompt` if --prompt-file cannot be read.
    pub fn prompt_template(&self) -> Result<PromptTemplate, ConfigError> {
        match self.prompt_file {
            Some(ref path) => Ok(PromptTemplate::from_file(path)?),
            None => Ok(PromptTemplate::default()),
        }
    }

    /// Repositories from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Repository` for a location without a usable name.
    pub fn repositories(&self) -> Result<Vec<RepoRef>, ConfigError> {
        repositories_from(|key| std::env::var(key).ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The temperature is outside 0.0 to 2.0
    /// - The prompt file is specified but doesn't exist
    /// - The checkout directory cannot be created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(temperature) = self.temperature {
            if !TEMPERATURE_RANGE.contains(&temperature) {
                return Err(ConfigError::InvalidTemperature(temperature));
            }
        }

        if let Some(ref prompt) = self.prompt_file {
            if !prompt.is_file() {
                return Err(ConfigError::PromptFileNotFound(prompt.clone()));
            }
        }

        let repo_dir = self.repo_dir();
        if !repo_dir.exists() {
            std::fs::create_dir_all(&repo_dir)
                .map_err(|e| ConfigError::DirectoryCreateFailed(repo_dir.clone(), e))?;
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Collect `REPO_URL_0`, `REPO_URL_1`, ... through `lookup`
///
/// Enumeration stops at the first missing or empty index, so order follows
/// the index.
///
/// # Errors
///
/// Returns `ConfigError::Repository` for a location without a usable name.
pub fn repositories_from<F>(lookup: F) -> Result<Vec<RepoRef>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut repos = Vec::new();
    for index in 0.. {
        let var = format!("{REPO_URL_PREFIX}{index}");
        let Some(url) = lookup(&var).filter(|url| !url.trim().is_empty()) else {
            break;
        };
        let repo = RepoRef::parse(url.trim())
            .map_err(|source| ConfigError::Repository { var, source })?;
        repos.push(repo);
    }
    Ok(repos)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid --since/--until input
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A `REPO_URL_<n>` value has no usable short name
    #[error("{var}: {source}")]
    Repository {
        /// Environment variable holding the location
        var: String,
        /// Underlying error
        #[source]
        source: GitError,
    },

    /// Temperature outside the accepted range
    #[error("Invalid temperature {0}; expected a value from 0.0 to 2.0")]
    InvalidTemperature(f64),

    /// Prompt file not found
    #[error("Prompt file not found: {0}")]
    PromptFileNotFound(PathBuf),

    /// Prompt file could not be loaded
    #[error(transparent)]
    Prompt(#[from] SummarizeError),

    /// Failed to create a working directory
    #[error("Failed to create directory {0}: {1}")]
    DirectoryCreateFailed(PathBuf, std::io::Error),
}
