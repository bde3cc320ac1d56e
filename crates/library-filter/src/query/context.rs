//! Per-record evaluation context.

use std::cell::OnceCell;

use crate::lookup::{PlaylistLookup, TagLookup};
use crate::record::LibraryRecord;
use crate::source_type::SourceType;

/// A record plus the lookups its filters consult.
///
/// Derived values such as the source type are computed on first use and
/// reused by every filter evaluated against the same record.
pub struct RecordQueryContext<'a, R> {
    record: &'a R,
    tags: &'a dyn TagLookup,
    playlists: &'a dyn PlaylistLookup,
    source_type: OnceCell<SourceType>,
}

impl<'a, R: LibraryRecord> RecordQueryContext<'a, R> {
    pub fn new(record: &'a R, tags: &'a dyn TagLookup, playlists: &'a dyn PlaylistLookup) -> Self {
        Self {
            record,
            tags,
            playlists,
            source_type: OnceCell::new(),
        }
    }

    pub fn record(&self) -> &'a R {
        self.record
    }

    pub fn source_type(&self) -> SourceType {
        *self.source_type.get_or_init(|| self.record.source_type())
    }

    pub fn is_video(&self) -> bool {
        self.source_type().is_video()
    }

    /// Whether any of the record's tags resolves to `name`.
    pub fn has_tag_named(&self, name: &str) -> bool {
        self.record
            .tag_ids()
            .iter()
            .filter_map(|id| self.tags.tag(*id))
            .any(|tag| tag.name == name)
    }

    /// Whether the playlist called `name` exists and lists this record.
    pub fn in_playlist(&self, name: &str) -> bool {
        self.playlists
            .playlist(name)
            .is_some_and(|playlist| playlist.contains(self.record.id()))
    }
}
