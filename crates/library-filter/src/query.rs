//! Token classification, compilation, and matching for library filtering.
//!
//! This module provides the filter language shared by the audio and source
//! libraries:
//! - Filter kinds (flags, tags, types, fields, playlists, numeric, text)
//! - Tokenization of raw search input
//! - Rule-table classification per library grammar
//! - Evaluation ordering by cost
//! - Matching against library records

mod context;
mod evaluate;
mod expression;
mod highlight;
mod matcher;
mod numeric;
mod optimizer;
mod parser;
mod text_match;

pub use context::RecordQueryContext;
pub use evaluate::{evaluate, CompiledFilter};
pub use expression::{FilterKind, TextField};
pub use matcher::LibraryQuery;
pub use numeric::{CompareOp, NumericComparison};
pub use parser::{classify, tokenize_search_input};
pub use text_match::TextPattern;
