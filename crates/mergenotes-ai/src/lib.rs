// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! mergenotes-ai: Chat-completion summarization of merge logs
//!
//! This library crate turns raw merge-log text into prose release notes by
//! sending it to an OpenAI-compatible chat-completion endpoint.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use mergenotes_ai::{ClientConfig, OpenAiClient, PromptTemplate, Summarizer};
//!
//! # async fn run() -> Result<(), mergenotes_ai::SummarizeError> {
//! let config = ClientConfig::new("sk-...");
//! let client = OpenAiClient::new(config, PromptTemplate::default().render("English"));
//! let note = client.summarize("service", "commit 1945ab9...").await?;
//! println!("{note}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{ClientConfig, OpenAiClient, Summarizer, user_message};
pub use error::SummarizeError;
pub use prompt::PromptTemplate;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};
