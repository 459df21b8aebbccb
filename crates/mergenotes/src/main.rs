//! mergenotes: release notes from merge-commit history
//!
//! This binary clones or updates the repositories named by `REPO_URL_<n>`,
//! collects their merge commits for a date range and either summarizes them
//! through a chat-completion API or prints them raw.

use clap::Parser;
use mergenotes::config::Config;
use mergenotes::pipeline;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing subscriber on stderr so stdout carries only notes
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting mergenotes...");

    let today = chrono::Local::now().date_naive();
    let report = pipeline::run(&config, today).await?;

    for path in report.notes.saved() {
        info!("Release note written to {}", path.display());
    }

    Ok(())
}
