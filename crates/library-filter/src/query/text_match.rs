//! Case-insensitive text patterns for literal and free-text filters.

use regex::{Regex, RegexBuilder};

use crate::options::TextPatternMode;

/// Upper bound on the compiled size of a user-supplied pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A compiled text test applied to each searchable field of a record.
#[derive(Debug, Clone)]
pub enum TextPattern {
    Regex(Regex),
    /// Lowercased needle, used when the text cannot be compiled.
    Substring(String),
}

impl TextPattern {
    /// Builds the pattern for `text`. Never fails: text that does not
    /// compile degrades to a case-insensitive substring test.
    pub fn compile(text: &str, mode: TextPatternMode) -> Self {
        let source = match mode {
            TextPatternMode::Escaped => regex::escape(text),
            // Only the first backslash is doubled; the rest pass through.
            TextPatternMode::LegacyRegex => text.replacen('\\', "\\\\", 1),
        };

        match RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => Self::Regex(regex),
            Err(error) => {
                log::debug!("text pattern {text:?} falls back to substring matching: {error}");
                Self::Substring(text.to_lowercase())
            }
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(candidate),
            Self::Substring(needle) => candidate.to_lowercase().contains(needle.as_str()),
        }
    }

    /// True when any of `fields` matches.
    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields.into_iter().any(|field| self.is_match(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_mode_treats_metacharacters_literally() {
        let pattern = TextPattern::compile("a.b", TextPatternMode::Escaped);
        assert!(pattern.is_match("xA.By"));
        assert!(!pattern.is_match("axb"));

        let pattern = TextPattern::compile(r"c:\music\a", TextPatternMode::Escaped);
        assert!(pattern.is_match(r"C:\Music\A.mp3"));
    }

    #[test]
    fn legacy_mode_is_a_case_insensitive_regex() {
        let pattern = TextPattern::compile("^cat|dog$", TextPatternMode::LegacyRegex);
        assert!(pattern.is_match("Catalog"));
        assert!(pattern.is_match("hotDOG"));
        assert!(!pattern.is_match("a cat"));
    }

    #[test]
    fn legacy_mode_doubles_only_the_first_backslash() {
        // `a\b` becomes the regex `a\\b`: a literal backslash.
        let pattern = TextPattern::compile(r"a\b", TextPatternMode::LegacyRegex);
        assert!(pattern.is_match(r"xa\by"));

        // `a\b\d` becomes `a\\b\d`: the second backslash still starts a class.
        let pattern = TextPattern::compile(r"a\b\d", TextPatternMode::LegacyRegex);
        assert!(pattern.is_match(r"a\b7"));
        assert!(!pattern.is_match(r"a\b\d"));
    }

    #[test]
    fn invalid_legacy_pattern_falls_back_to_substring() {
        let pattern = TextPattern::compile("(unclosed", TextPatternMode::LegacyRegex);
        assert!(matches!(pattern, TextPattern::Substring(_)));
        assert!(pattern.is_match("An (UNCLOSED paren"));
        assert!(!pattern.is_match("unclosed"));
    }

    #[test]
    fn empty_text_matches_everything() {
        let pattern = TextPattern::compile("", TextPatternMode::Escaped);
        assert!(pattern.is_match(""));
        assert!(pattern.matches_any(["anything"]));
        assert!(!pattern.matches_any(std::iter::empty::<&str>()));
    }
}
