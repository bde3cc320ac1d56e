use std::sync::Arc;

use moka::sync::Cache;

use crate::engine::filter_library;
use crate::error::Result;
use crate::lookup::LibraryView;
use crate::options::FilterOptions;
use crate::record::LibraryRecord;
use crate::types::{LibraryKind, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FilterCacheKey {
    library: LibraryKind,
    revision: u64,
    candidates: Vec<RecordId>,
    tokens: Vec<String>,
    options: FilterOptions,
}

/// Memoizes filter results per library revision.
///
/// The cache cannot see library contents, so callers bump `revision` (or
/// call [`FilterCache::invalidate_all`]) whenever records, tags or
/// playlists change.
#[derive(Debug, Clone)]
pub struct FilterCache {
    cache: Cache<FilterCacheKey, Arc<[RecordId]>>,
}

impl FilterCache {
    pub fn new(max_entries: u64) -> Self {
        let max_capacity = if max_entries == 0 { 1 } else { max_entries };
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self { cache }
    }

    /// Same as [`filter_library`], reusing an earlier result when the
    /// revision, candidates, tokens and options are unchanged.
    pub fn filter<R, S>(
        &self,
        revision: u64,
        candidates: &[RecordId],
        tokens: &[S],
        library: &LibraryView<'_, R>,
        options: &FilterOptions,
    ) -> Result<Arc<[RecordId]>>
    where
        R: LibraryRecord,
        S: AsRef<str>,
    {
        let key = FilterCacheKey {
            library: R::KIND,
            revision,
            candidates: candidates.to_vec(),
            tokens: tokens.iter().map(|token| token.as_ref().to_string()).collect(),
            options: *options,
        };
        if let Some(hit) = self.cache.get(&key) {
            log::trace!("filter cache hit for {} tokens", key.tokens.len());
            return Ok(hit);
        }

        let filtered: Arc<[RecordId]> =
            filter_library(candidates, tokens, library, options)?.into();
        self.cache.insert(key, Arc::clone(&filtered));
        Ok(filtered)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LibrarySnapshot;
    use crate::options::MalformedNumberPolicy;
    use crate::types::AudioRecord;

    fn library() -> LibrarySnapshot<AudioRecord> {
        let mut snapshot = LibrarySnapshot::new();
        for (id, artist) in [(1, "Bowie"), (2, "Eno"), (3, "Bowie")] {
            snapshot.insert_record(
                id,
                AudioRecord {
                    id,
                    url: format!("/music/{id}.mp3"),
                    artist: Some(artist.to_string()),
                    ..AudioRecord::default()
                },
            );
        }
        snapshot
    }

    #[test]
    fn reuses_results_for_the_same_revision() {
        let cache = FilterCache::new(16);
        let snapshot = library();
        let view = snapshot.view();
        let options = FilterOptions::default();

        let first = cache
            .filter(1, &[1, 2, 3], &["artist:Bowie"], &view, &options)
            .expect("filter");
        let second = cache
            .filter(1, &[1, 2, 3], &["artist:Bowie"], &view, &options)
            .expect("filter");
        assert_eq!(&*first, &[1, 3]);
        assert!(Arc::ptr_eq(&first, &second));

        let bumped = cache
            .filter(2, &[1, 2, 3], &["artist:Bowie"], &view, &options)
            .expect("filter");
        assert!(!Arc::ptr_eq(&first, &bumped));
        assert_eq!(first, bumped);

        let reordered = cache
            .filter(1, &[3, 2, 1], &["artist:Bowie"], &view, &options)
            .expect("filter");
        assert_eq!(&*reordered, &[3, 1]);
        assert_eq!(cache.entry_count(), 3);
    }

    #[test]
    fn invalidate_all_forces_recompute() {
        let cache = FilterCache::new(0);
        let snapshot = library();
        let view = snapshot.view();
        let options = FilterOptions::default();
        let first = cache
            .filter(1, &[1, 2], &["bowie"], &view, &options)
            .expect("filter");
        assert!(cache.entry_count() <= 1);

        cache.invalidate_all();
        let second = cache
            .filter(1, &[1, 2], &["bowie"], &view, &options)
            .expect("filter");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(&*second, &[1]);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = FilterCache::new(4);
        let snapshot = library();
        let view = snapshot.view();
        let strict =
            FilterOptions::default().with_malformed_numbers(MalformedNumberPolicy::Reject);
        assert!(cache.filter(1, &[1], &["count>"], &view, &strict).is_err());
        assert_eq!(cache.entry_count(), 0);
    }
}
