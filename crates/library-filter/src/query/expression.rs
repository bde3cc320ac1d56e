//! Classified filter types.

use super::numeric::NumericComparison;

/// Named text attributes testable with `field:value` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Artist,
    Album,
    Comment,
}

impl TextField {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Artist => "artist:",
            Self::Album => "album:",
            Self::Comment => "comment:",
        }
    }
}

/// The typed form of one search token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Marked,
    Untagged,
    Offline,
    Unclipped,
    Tag {
        name: String,
        negate: bool,
    },
    TypeName {
        name: String,
        negate: bool,
    },
    /// `value` is `None` when nothing follows the `field:` prefix, which tests
    /// for presence instead of equality.
    Field {
        field: TextField,
        negate: bool,
        value: Option<String>,
    },
    Playlist {
        name: String,
    },
    Count {
        comparison: NumericComparison,
        require_complete: bool,
    },
    Duration(NumericComparison),
    Resolution(NumericComparison),
    Literal {
        text: String,
        negate: bool,
    },
    FreeText {
        text: String,
        negate: bool,
    },
}

impl FilterKind {
    /// Text to build a pattern from, for the two text-search kinds.
    pub fn search_text(&self) -> Option<&str> {
        match self {
            Self::Literal { text, .. } | Self::FreeText { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// The numeric comparison carried by this filter, if any.
    pub fn comparison(&self) -> Option<&NumericComparison> {
        match self {
            Self::Count { comparison, .. } => Some(comparison),
            Self::Duration(comparison) | Self::Resolution(comparison) => Some(comparison),
            _ => None,
        }
    }
}
