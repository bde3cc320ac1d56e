//! Filter evaluation against a single record.

use crate::lookup::{PlaylistLookup, TagLookup};
use crate::options::{FilterOptions, TextPatternMode};
use crate::record::LibraryRecord;

use super::context::RecordQueryContext;
use super::expression::FilterKind;
use super::numeric::NumericComparison;
use super::text_match::TextPattern;

/// A classified filter with its text pattern compiled ahead of evaluation.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    kind: FilterKind,
    pattern: Option<TextPattern>,
}

impl CompiledFilter {
    pub fn new(kind: FilterKind, mode: TextPatternMode) -> Self {
        let pattern = kind
            .search_text()
            .map(|text| TextPattern::compile(text, mode));
        Self { kind, pattern }
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn matches<R: LibraryRecord>(&self, context: &RecordQueryContext<'_, R>) -> bool {
        evaluate_record_filter(&self.kind, self.pattern.as_ref(), context)
    }
}

/// Evaluates one filter against one record using default options.
///
/// Text patterns are compiled on every call; use
/// [`LibraryQuery`](crate::LibraryQuery) to evaluate many records.
pub fn evaluate<R: LibraryRecord>(
    filter: &FilterKind,
    record: &R,
    tags: &dyn TagLookup,
    playlists: &dyn PlaylistLookup,
) -> bool {
    let compiled = CompiledFilter::new(filter.clone(), FilterOptions::default().text_patterns);
    compiled.matches(&RecordQueryContext::new(record, tags, playlists))
}

fn evaluate_record_filter<R: LibraryRecord>(
    filter: &FilterKind,
    pattern: Option<&TextPattern>,
    context: &RecordQueryContext<'_, R>,
) -> bool {
    let record = context.record();
    match filter {
        FilterKind::Marked => record.is_marked(),
        FilterKind::Untagged => record.tag_ids().is_empty(),
        FilterKind::Offline => record.is_offline(),
        FilterKind::Unclipped => context.is_video() && record.clip_count() == Some(0),
        FilterKind::Tag { name, negate } => context.has_tag_named(name) != *negate,
        FilterKind::TypeName { name, negate } => {
            (context.source_type().display_name() == name.as_str()) != *negate
        }
        FilterKind::Field {
            field,
            negate,
            value,
        } => {
            let current = record.text_field(*field).filter(|value| !value.is_empty());
            match value.as_deref() {
                None if *negate => current.is_some(),
                None => current.is_none(),
                Some(expected) => (current == Some(expected)) != *negate,
            }
        }
        FilterKind::Playlist { name } => context.in_playlist(name),
        FilterKind::Count {
            comparison,
            require_complete,
        } => {
            (!require_complete || record.count_complete())
                && comparison.matches(record.count_metric())
        }
        FilterKind::Duration(comparison) => {
            context.is_video() && matches_duration(comparison, record.duration_secs())
        }
        FilterKind::Resolution(comparison) => {
            context.is_video()
                && record
                    .resolution()
                    .is_some_and(|resolution| comparison.matches(resolution))
        }
        FilterKind::Literal { negate, .. } | FilterKind::FreeText { negate, .. } => {
            let Some(pattern) = pattern else {
                return false;
            };
            pattern.matches_any(record.searchable_fields()) != *negate
        }
    }
}

fn matches_duration(comparison: &NumericComparison, duration: Option<f64>) -> bool {
    let Some(seconds) = duration else {
        return false;
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return false;
    }
    comparison.matches(seconds.floor() as u64)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::query::expression::TextField;
    use crate::query::numeric::CompareOp;
    use crate::query::parser::classify;
    use crate::types::{AudioRecord, Clip, LibraryKind, Playlist, SourceRecord, Tag, TagId};

    fn tags() -> HashMap<TagId, Tag> {
        HashMap::from([(
            1,
            Tag {
                id: 1,
                name: "Red".to_string(),
            },
        )])
    }

    fn playlists() -> Vec<Playlist> {
        vec![Playlist {
            name: "Gym".to_string(),
            members: vec![10],
        }]
    }

    fn audio(id: u64) -> AudioRecord {
        AudioRecord {
            id,
            url: format!("/music/{id}.mp3"),
            ..AudioRecord::default()
        }
    }

    fn video(duration: Option<f64>, clips: usize) -> SourceRecord {
        SourceRecord {
            id: 1,
            url: "/videos/trip.mp4".to_string(),
            duration,
            clips: (0..clips as u64)
                .map(|id| Clip {
                    id,
                    start: 0.0,
                    end: 1.0,
                })
                .collect(),
            ..SourceRecord::default()
        }
    }

    fn check_audio(token: &str, record: &AudioRecord) -> bool {
        evaluate(
            &classify(token, LibraryKind::Audio),
            record,
            &tags(),
            &playlists(),
        )
    }

    fn check_source(token: &str, record: &SourceRecord) -> bool {
        evaluate(
            &classify(token, LibraryKind::Source),
            record,
            &tags(),
            &playlists(),
        )
    }

    #[test]
    fn flags() {
        let mut record = audio(1);
        assert!(!check_audio("<Marked>", &record));
        assert!(check_audio("<Untagged>", &record));
        record.marked = true;
        record.tags.push(1);
        assert!(check_audio("<Marked>", &record));
        assert!(!check_audio("<Untagged>", &record));

        let offline = SourceRecord {
            offline: true,
            ..SourceRecord::default()
        };
        assert!(check_source("<Offline>", &offline));
    }

    #[test]
    fn unclipped_requires_video_without_clips() {
        assert!(check_source("<Unclipped>", &video(None, 0)));
        assert!(!check_source("<Unclipped>", &video(None, 2)));
        let gallery = SourceRecord {
            url: "/pics".to_string(),
            ..SourceRecord::default()
        };
        assert!(!check_source("<Unclipped>", &gallery));
    }

    #[test]
    fn tags_are_matched_by_name() {
        let mut record = audio(1);
        record.tags.push(1);
        assert!(check_audio("[Red]", &record));
        assert!(!check_audio("[red]", &record));
        assert!(!check_audio("-[Red]", &record));

        // Dangling tag ids are ignored.
        let mut dangling = audio(2);
        dangling.tags.push(99);
        assert!(!check_audio("[Red]", &dangling));
        assert!(check_audio("-[Red]", &dangling));
    }

    #[test]
    fn type_names_use_display_names() {
        assert!(check_source("{Video}", &video(None, 0)));
        assert!(!check_source("-{Video}", &video(None, 0)));
        assert!(check_source("-{Local Directory}", &video(None, 0)));
    }

    #[test]
    fn field_presence_and_equality() {
        let mut record = audio(1);
        assert!(check_audio("artist:", &record));
        assert!(!check_audio("-artist:", &record));
        assert!(check_audio("-artist:Bowie", &record));

        record.artist = Some(String::new());
        assert!(check_audio("artist:", &record), "empty counts as absent");

        record.artist = Some("Bowie".to_string());
        assert!(check_audio("artist:Bowie", &record));
        assert!(!check_audio("artist:bowie", &record), "case sensitive");
        assert!(check_audio("-artist:", &record));
        assert!(!check_audio("-artist:Bowie", &record));
        assert!(check_audio("album:", &record));
    }

    #[test]
    fn field_negation_is_the_complement() {
        let mut record = audio(1);
        for artist in [None, Some("Bowie"), Some("Eno")] {
            record.artist = artist.map(str::to_string);
            for value in ["", "Bowie"] {
                let positive = check_audio(&format!("artist:{value}"), &record);
                let negative = check_audio(&format!("-artist:{value}"), &record);
                assert_ne!(positive, negative, "artist {artist:?} value {value:?}");
            }
        }
    }

    #[test]
    fn playlist_membership() {
        assert!(check_audio("playlist:Gym", &audio(10)));
        assert!(!check_audio("playlist:Gym", &audio(11)));
        assert!(!check_audio("playlist:Missing", &audio(10)));
    }

    #[test]
    fn count_uses_completeness_gate() {
        let mut gallery = SourceRecord {
            url: "/pics".to_string(),
            count: 5,
            count_complete: false,
            ..SourceRecord::default()
        };
        assert!(!check_source("count>1", &gallery));
        assert!(check_source("count+>1", &gallery));
        gallery.count_complete = true;
        assert!(check_source("count>1", &gallery));
        assert!(check_source("count=5", &gallery));
        assert!(!check_source("count<5", &gallery));
    }

    #[test]
    fn audio_count_is_play_count() {
        let mut record = audio(1);
        record.played_count = 3;
        assert!(check_audio("count>2", &record));
        assert!(!check_audio("count<3", &record));
    }

    #[test]
    fn malformed_count_never_matches() {
        let gallery = SourceRecord {
            url: "/pics".to_string(),
            count_complete: true,
            ..SourceRecord::default()
        };
        for token in ["count=", "count>", "count<", "count+="] {
            assert!(!check_source(token, &gallery), "{token}");
        }
    }

    #[test]
    fn duration_floors_seconds_and_needs_video() {
        assert!(check_source("duration=95", &video(Some(95.9), 0)));
        assert!(check_source("duration<1:36", &video(Some(95.9), 0)));
        assert!(!check_source("duration>1:00", &video(None, 0)));
        assert!(!check_source("duration>0", &video(Some(f64::NAN), 0)));

        let gallery = SourceRecord {
            url: "/pics".to_string(),
            duration: Some(500.0),
            ..SourceRecord::default()
        };
        assert!(!check_source("duration>1", &gallery));
    }

    #[test]
    fn resolution_needs_known_value() {
        let mut record = video(None, 0);
        assert!(!check_source("resolution>0", &record));
        record.resolution = Some(1080);
        assert!(check_source("resolution>720", &record));
        assert!(check_source("resolution=1080p", &record));
        assert!(!check_source("resolution<1080", &record));

        let gallery = SourceRecord {
            url: "/pics".to_string(),
            resolution: Some(1080),
            ..SourceRecord::default()
        };
        assert!(!check_source("resolution>720", &gallery), "only videos have a resolution");
    }

    #[test]
    fn text_filters_search_every_field() {
        let mut record = audio(1);
        record.album = Some("Low".to_string());
        record.comment = Some("hidden".to_string());
        assert!(check_audio("low", &record));
        assert!(check_audio("\"LOW\"", &record));
        assert!(check_audio("-\"hidden\"", &record), "comments are not searched");
        assert!(check_audio("music", &record), "url is searched");
        assert!(!check_audio("-low", &record));
    }

    #[test]
    fn literal_negation_is_the_complement() {
        let record = audio(1);
        for text in ["music", "nothing", ""] {
            let positive = check_audio(&format!("\"{text}\""), &record);
            let negative = check_audio(&format!("-\"{text}\""), &record);
            assert_ne!(positive, negative, "{text:?}");
        }
    }

    #[test]
    fn compiled_filter_exposes_kind() {
        let compiled = CompiledFilter::new(
            FilterKind::Field {
                field: TextField::Album,
                negate: false,
                value: None,
            },
            TextPatternMode::Escaped,
        );
        assert!(matches!(compiled.kind(), FilterKind::Field { .. }));
        let count = CompiledFilter::new(
            FilterKind::Count {
                comparison: NumericComparison::new(CompareOp::Gt, Some(1)),
                require_complete: true,
            },
            TextPatternMode::Escaped,
        );
        assert!(count.pattern.is_none());
    }
}
