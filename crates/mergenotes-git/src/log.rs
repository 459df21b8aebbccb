//! Merge-log records

/// Raw output of a merge-only `git log` query for one repository
///
/// The text is kept verbatim and handed downstream as an opaque blob. The
/// helpers here only scan `commit <sha>` header lines, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeLog {
    text: String,
}

impl MergeLog {
    /// Wrap captured log output
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Validate that a SHA is a 40 (SHA-1) or 64 (SHA-256) character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        matches!(sha.len(), 40 | 64) && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// The log text exactly as git printed it
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when git printed nothing but whitespace (no merges in range)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// SHAs of the commit headers, in log order
    ///
    /// Decorations such as `(HEAD -> main)` after the SHA are ignored.
    pub fn shas(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter_map(|line| {
            let sha = line.strip_prefix("commit ")?.split_whitespace().next()?;
            Self::is_valid_sha(sha).then_some(sha)
        })
    }

    /// Number of merge commits in the log
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.shas().count()
    }
}

impl AsRef<str> for MergeLog {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
