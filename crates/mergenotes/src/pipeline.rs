// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The release-note pipeline
//!
//! Configuration resolution, repository sync, log extraction and note
//! generation, run in that order. Errors from the first three phases abort
//! the run; note generation isolates failures per repository.

use std::io::Write;

use anyhow::Context;
use chrono::NaiveDate;
use mergenotes_ai::{ClientConfig, OpenAiClient};
use mergenotes_git::{Git, RepoRef};
use tracing::{info, warn};

use crate::config::Config;
use crate::extract::extract_logs;
use crate::notes::{NoteMode, NoteReport, ReleaseNoteStore, generate_notes};
use crate::range::DateRange;
use crate::sync::{SyncOptions, sync_repositories};

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The resolved date range
    pub range: DateRange,
    /// Per-repository note outcomes
    pub notes: NoteReport,
}

/// Run the pipeline with repositories from the environment, printing to stdout
///
/// # Errors
///
/// Returns an error for invalid configuration, any git failure, or a failed
/// write to stdout.
pub async fn run(config: &Config, today: NaiveDate) -> anyhow::Result<RunReport> {
    let repos = config.repositories()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(config, &repos, &Git::new(), today, &mut out).await
}

/// Run the pipeline for an explicit repository list
///
/// # Errors
///
/// Returns an error for invalid configuration, any git failure, or a failed
/// write to `out`.
pub async fn run_with<W: Write>(
    config: &Config,
    repos: &[RepoRef],
    git: &Git,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<RunReport> {
    // Configuration resolution
    let range = config.date_range(today)?;
    config.validate()?;
    let client = if config.summarize_enabled() {
        let prompt = config.prompt_template()?.render(config.language());
        let mut client_config = ClientConfig::new(config.api_key().unwrap_or_default())
            .with_model(config.model())
            .with_base_url(config.base_url());
        if let Some(temperature) = config.temperature {
            client_config = client_config.with_temperature(temperature);
        }
        Some(OpenAiClient::new(client_config, prompt))
    } else {
        if !config.skip_ai {
            info!("OPENAI_API_KEY is not set; printing raw merge logs");
        }
        None
    };
    info!(range = %range, repositories = repos.len(), "Resolved configuration");
    if repos.is_empty() {
        warn!("No repositories configured; set REPO_URL_0, REPO_URL_1, ...");
    }

    // Repository sync
    let sync_options = SyncOptions {
        root: config.repo_dir(),
        branch: config.branch().to_string(),
        update: !config.skip_checkout_pull,
    };
    let checkouts =
        sync_repositories(git, repos, &sync_options).context("Failed to sync repositories")?;

    // Log extraction
    let logs = extract_logs(git, &checkouts, &range).context("Failed to extract merge logs")?;

    // Note generation
    info!("Generating release notes for {range}");
    let mode = match client {
        Some(ref client) => NoteMode::Summarize(client),
        None => NoteMode::Raw,
    };
    let store = ReleaseNoteStore::new(config.output_dir());
    let notes = generate_notes(&logs, &range, mode, &store, out)
        .await
        .context("Failed to write release notes")?;

    info!(
        saved = notes.saved().len(),
        failed = notes.failed(),
        "Finished"
    );
    Ok(RunReport { range, notes })
}
