// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! System instruction templates
//!
//! The instruction that steers the model is plain text. The default ships in
//! `prompts/release_notes.md`; a replacement can be loaded from any file.

use std::path::Path;

use crate::error::SummarizeError;

/// Built-in release-note instruction
pub const DEFAULT_TEMPLATE: &str = include_str!("../prompts/release_notes.md");

/// Placeholder replaced by the requested output language
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// A system-instruction template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PromptTemplate {
    /// Create a template from text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a template from a file
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::PromptRead` if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SummarizeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SummarizeError::PromptRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    /// The unrendered template text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitute the output language, trimming surrounding whitespace
    #[must_use]
    pub fn render(&self, language: &str) -> String {
        self.text
            .replace(LANGUAGE_PLACEHOLDER, language)
            .trim()
            .to_string()
    }
}
