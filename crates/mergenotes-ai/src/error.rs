// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for mergenotes-ai

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing a summary
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Transport-level failure (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body, or the raw body
        message: String,
    },

    /// The response carried no message content
    #[error("Response contained no message content")]
    EmptyResponse,

    /// A prompt file could not be read
    #[error("Failed to read prompt file {path}: {source}")]
    PromptRead {
        /// Path of the prompt file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
