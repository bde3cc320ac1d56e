//! Token classification and search-input tokenizing.
//!
//! Every token classifies into exactly one [`FilterKind`]. Rules are tried in
//! priority order and the first match wins; anything no rule accepts is
//! free text.

use crate::types::LibraryKind;

use super::expression::{FilterKind, TextField};
use super::numeric::{parse_count_token, parse_duration_token, parse_resolution_token};

// ---------------------------------------------------------------------------
// Classifier rules
// ---------------------------------------------------------------------------

struct ClassifierRule {
    name: &'static str,
    /// Libraries whose grammar includes this rule.
    libraries: &'static [LibraryKind],
    classify: fn(&str, LibraryKind) -> Option<FilterKind>,
}

const BOTH: &[LibraryKind] = &[LibraryKind::Audio, LibraryKind::Source];
const AUDIO: &[LibraryKind] = &[LibraryKind::Audio];
const SOURCE: &[LibraryKind] = &[LibraryKind::Source];

const CLASSIFIER_RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "sentinel",
        libraries: BOTH,
        classify: classify_sentinel,
    },
    ClassifierRule {
        name: "tag",
        libraries: BOTH,
        classify: classify_tag,
    },
    ClassifierRule {
        name: "type",
        libraries: SOURCE,
        classify: classify_type_name,
    },
    ClassifierRule {
        name: "field",
        libraries: AUDIO,
        classify: classify_field,
    },
    ClassifierRule {
        name: "playlist",
        libraries: AUDIO,
        classify: classify_playlist,
    },
    ClassifierRule {
        name: "count",
        libraries: BOTH,
        classify: classify_count,
    },
    ClassifierRule {
        name: "duration",
        libraries: SOURCE,
        classify: classify_duration,
    },
    ClassifierRule {
        name: "resolution",
        libraries: SOURCE,
        classify: classify_resolution,
    },
    ClassifierRule {
        name: "literal",
        libraries: BOTH,
        classify: classify_literal,
    },
];

/// Classifies one token using the grammar of `library`.
pub fn classify(token: &str, library: LibraryKind) -> FilterKind {
    for rule in CLASSIFIER_RULES {
        if !rule.libraries.contains(&library) {
            continue;
        }
        if let Some(kind) = (rule.classify)(token, library) {
            log::trace!("token {token:?} classified by {} rule: {kind:?}", rule.name);
            return kind;
        }
    }

    let (negate, text) = split_negation(token);
    log::trace!("token {token:?} classified as free text");
    FilterKind::FreeText {
        text: text.to_string(),
        negate,
    }
}

fn classify_sentinel(token: &str, library: LibraryKind) -> Option<FilterKind> {
    match (token, library) {
        ("<Marked>", _) => Some(FilterKind::Marked),
        ("<Untagged>", _) => Some(FilterKind::Untagged),
        ("<Offline>", LibraryKind::Source) => Some(FilterKind::Offline),
        ("<Unclipped>", LibraryKind::Source) => Some(FilterKind::Unclipped),
        _ => None,
    }
}

fn classify_tag(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    let (negate, name) = split_delimited(token, '[', ']')?;
    Some(FilterKind::Tag {
        name: name.to_string(),
        negate,
    })
}

fn classify_type_name(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    let (negate, name) = split_delimited(token, '{', '}')?;
    Some(FilterKind::TypeName {
        name: name.to_string(),
        negate,
    })
}

fn classify_field(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    let field = [TextField::Artist, TextField::Album, TextField::Comment]
        .into_iter()
        .find(|field| {
            let prefix = field.prefix();
            token.starts_with(prefix)
                || token
                    .strip_prefix('-')
                    .is_some_and(|rest| rest.starts_with(prefix))
        })?;

    // The prefix is removed wherever it first occurs, so `artist:-x` and
    // `-artist:x` both negate.
    let remainder = token.replacen(field.prefix(), "", 1);
    let (negate, value) = split_negation(remainder.as_str());
    Some(FilterKind::Field {
        field,
        negate,
        value: (!value.is_empty()).then(|| value.to_string()),
    })
}

fn classify_playlist(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    let name = token.strip_prefix("playlist:")?;
    Some(FilterKind::Playlist {
        name: name.to_string(),
    })
}

fn classify_count(token: &str, library: LibraryKind) -> Option<FilterKind> {
    let allow_override = library == LibraryKind::Source;
    let (comparison, require_complete) = parse_count_token(token, allow_override)?;
    Some(FilterKind::Count {
        comparison,
        require_complete,
    })
}

fn classify_duration(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    parse_duration_token(token).map(FilterKind::Duration)
}

fn classify_resolution(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    parse_resolution_token(token).map(FilterKind::Resolution)
}

fn classify_literal(token: &str, _library: LibraryKind) -> Option<FilterKind> {
    let (negate, rest) = split_negation(token);
    let quote = rest.chars().next().filter(|ch| matches!(ch, '"' | '\''))?;
    let inner = rest.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(FilterKind::Literal {
        text: inner.to_string(),
        negate,
    })
}

fn split_negation(token: &str) -> (bool, &str) {
    match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    }
}

/// Splits `-?<open>inner<close>` into its negation flag and `inner`.
fn split_delimited(token: &str, open: char, close: char) -> Option<(bool, &str)> {
    let (negate, rest) = split_negation(token);
    let inner = rest.strip_prefix(open)?.strip_suffix(close)?;
    Some((negate, inner))
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Splits raw search input into tokens.
///
/// Whitespace separates tokens. A token opening with `"`, `'`, `[` or `{`
/// (after an optional `-`) runs to the matching closer and keeps its
/// delimiters, so `[Road Trip]` stays one token. An unterminated span takes
/// the rest of the input.
pub fn tokenize_search_input(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    while let Some(ch) = input[cursor..].chars().next() {
        if ch.is_whitespace() {
            cursor += ch.len_utf8();
            continue;
        }

        let end = token_end(input, cursor);
        tokens.push(input[cursor..end].to_string());
        cursor = end;
    }

    tokens
}

fn token_end(input: &str, start: usize) -> usize {
    let rest = &input[start..];
    let body = rest.strip_prefix('-').unwrap_or(rest);
    let body_start = start + (rest.len() - body.len());

    if let Some(open) = body.chars().next() {
        if let Some(close) = span_closer(open) {
            let content_start = body_start + open.len_utf8();
            return match input[content_start..].find(close) {
                Some(offset) => content_start + offset + close.len_utf8(),
                None => input.len(),
            };
        }
    }

    rest.find(char::is_whitespace)
        .map(|offset| start + offset)
        .unwrap_or(input.len())
}

fn span_closer(open: char) -> Option<char> {
    match open {
        '"' => Some('"'),
        '\'' => Some('\''),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}
