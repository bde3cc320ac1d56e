//! Library filtering for audio and source libraries.
//!
//! This crate provides the search-bar filter language:
//! - Token classification into filters per library grammar
//! - Record evaluation against tags, playlists and source types
//! - Candidate filtering that preserves order
//! - Result memoization keyed by library revision

pub mod cache;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod options;
pub mod query;
pub mod record;
pub mod source_type;
pub mod types;

// Re-export main types
pub use cache::FilterCache;
pub use engine::filter_library;
pub use error::{FilterError, Result};
pub use lookup::{LibrarySnapshot, LibraryView, PlaylistLookup, RecordLookup, TagLookup};
pub use options::{FilterOptions, MalformedNumberPolicy, TextPatternMode};
pub use query::{classify, evaluate, tokenize_search_input, FilterKind, LibraryQuery, TextField};
pub use record::LibraryRecord;
pub use source_type::SourceType;
pub use types::{AudioRecord, Clip, LibraryKind, Playlist, RecordId, SourceRecord, Tag, TagId};
