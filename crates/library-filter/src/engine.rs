//! Library filtering over an ordered candidate list.

use crate::error::Result;
use crate::lookup::LibraryView;
use crate::options::FilterOptions;
use crate::query::LibraryQuery;
use crate::record::LibraryRecord;
use crate::types::RecordId;

/// Returns the candidates whose record satisfies every token.
///
/// The output is a subsequence of `candidates`: nothing is added, removed
/// as a duplicate, or reordered. With no tokens the candidates come back
/// unchanged, even those missing from `library.records`; otherwise a
/// candidate without a record never matches.
pub fn filter_library<R, S>(
    candidates: &[RecordId],
    tokens: &[S],
    library: &LibraryView<'_, R>,
    options: &FilterOptions,
) -> Result<Vec<RecordId>>
where
    R: LibraryRecord,
    S: AsRef<str>,
{
    if tokens.is_empty() {
        return Ok(candidates.to_vec());
    }

    let query = LibraryQuery::for_records::<R, S>(tokens, options)?;
    Ok(filter_candidates(&query, candidates, library))
}

pub(crate) fn filter_candidates<R: LibraryRecord>(
    query: &LibraryQuery,
    candidates: &[RecordId],
    library: &LibraryView<'_, R>,
) -> Vec<RecordId> {
    if query.is_empty() {
        return candidates.to_vec();
    }

    let mut missing = 0usize;
    let matched = candidates
        .iter()
        .copied()
        .filter(|id| match library.records.record(*id) {
            Some(record) => query.matches(record, library.tags, library.playlists),
            None => {
                missing += 1;
                false
            }
        })
        .collect::<Vec<_>>();

    if missing > 0 {
        log::debug!("{missing} candidate(s) had no record and were dropped");
    }
    matched
}
