//! Field accessors adapting each record kind to the searchable surface.

use crate::query::TextField;
use crate::source_type::SourceType;
use crate::types::{AudioRecord, LibraryKind, RecordId, SourceRecord, TagId};

/// The view of a library record that filters are evaluated against.
///
/// Flags and metrics that a library kind does not track keep their default
/// implementation; the classifier never produces filters for them in that
/// library anyway.
pub trait LibraryRecord {
    /// Selects the token grammar used for this record kind.
    const KIND: LibraryKind;

    fn id(&self) -> RecordId;

    fn url(&self) -> &str;

    fn tag_ids(&self) -> &[TagId];

    fn is_marked(&self) -> bool;

    /// Text fields tested by literal and free-text filters, in order.
    fn searchable_fields(&self) -> impl Iterator<Item = &str> + '_;

    /// Value of a named text field, `None` when absent.
    fn text_field(&self, field: TextField) -> Option<&str>;

    /// The value `count` comparisons test.
    fn count_metric(&self) -> u64;

    /// Whether the background scan behind [`count_metric`](Self::count_metric)
    /// finished.
    fn count_complete(&self) -> bool {
        true
    }

    fn is_offline(&self) -> bool {
        false
    }

    fn source_type(&self) -> SourceType {
        SourceType::from_url(self.url())
    }

    /// Number of clips, `None` for records that cannot carry clips.
    fn clip_count(&self) -> Option<usize> {
        None
    }

    fn duration_secs(&self) -> Option<f64> {
        None
    }

    fn resolution(&self) -> Option<u64> {
        None
    }
}

impl LibraryRecord for AudioRecord {
    const KIND: LibraryKind = LibraryKind::Audio;

    fn id(&self) -> RecordId {
        self.id
    }

    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn tag_ids(&self) -> &[TagId] {
        &self.tags
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.url.as_str()).chain(
            [&self.name, &self.artist, &self.album]
                .into_iter()
                .filter_map(|value| value.as_deref()),
        )
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Artist => self.artist.as_deref(),
            TextField::Album => self.album.as_deref(),
            TextField::Comment => self.comment.as_deref(),
        }
    }

    fn count_metric(&self) -> u64 {
        self.played_count
    }
}

impl LibraryRecord for SourceRecord {
    const KIND: LibraryKind = LibraryKind::Source;

    fn id(&self) -> RecordId {
        self.id
    }

    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn tag_ids(&self) -> &[TagId] {
        &self.tags
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.url.as_str())
    }

    fn text_field(&self, _field: TextField) -> Option<&str> {
        None
    }

    fn count_metric(&self) -> u64 {
        if self.source_type().is_video() {
            self.clips.len() as u64
        } else {
            self.count
        }
    }

    fn count_complete(&self) -> bool {
        self.count_complete
    }

    fn is_offline(&self) -> bool {
        self.offline
    }

    fn clip_count(&self) -> Option<usize> {
        Some(self.clips.len())
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration
    }

    fn resolution(&self) -> Option<u64> {
        self.resolution
    }
}
