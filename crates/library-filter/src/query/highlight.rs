//! Highlight term extraction.
//!
//! Collects the text of positive literal and free-text filters so the UI can
//! mark what matched. Terms are lowercased and deduplicated through a
//! `BTreeSet`, giving sorted output.

use std::collections::BTreeSet;

use super::expression::FilterKind;

pub fn derive_highlight_terms<'a, I>(filters: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a FilterKind>,
{
    filters
        .into_iter()
        .filter_map(|filter| match filter {
            FilterKind::Literal {
                text,
                negate: false,
            }
            | FilterKind::FreeText {
                text,
                negate: false,
            } => Some(text.trim().to_lowercase()),
            _ => None,
        })
        .filter(|term| !term.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
