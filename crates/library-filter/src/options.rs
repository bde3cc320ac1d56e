//! Behavioural switches for query compilation.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How literal and free-text search text is turned into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPatternMode {
    /// Every regex metacharacter is escaped; search text matches as a
    /// case-insensitive substring.
    #[default]
    Escaped,
    /// Search text is a case-insensitive regular expression. Only the first
    /// backslash is doubled before compiling, matching the desktop UI.
    LegacyRegex,
}

/// What to do with a numeric filter whose value cannot be parsed
/// (`count>`, `duration>1::0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedNumberPolicy {
    /// The filter compiles and never matches.
    #[default]
    NeverMatch,
    /// Compilation fails with [`FilterError::InvalidNumber`](crate::FilterError::InvalidNumber).
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub text_patterns: TextPatternMode,
    pub malformed_numbers: MalformedNumberPolicy,
}

impl FilterOptions {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_text_patterns(mut self, mode: TextPatternMode) -> Self {
        self.text_patterns = mode;
        self
    }

    pub fn with_malformed_numbers(mut self, policy: MalformedNumberPolicy) -> Self {
        self.malformed_numbers = policy;
        self
    }
}
