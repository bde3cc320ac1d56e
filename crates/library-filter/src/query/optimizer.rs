//! Evaluation ordering for compiled queries.
//!
//! A query is a conjunction of pure predicates, so any order yields the same
//! result. Running cheap tests first lets the per-record short circuit skip
//! lookups and regex scans.

use super::evaluate::CompiledFilter;
use super::expression::FilterKind;

/// Reorders filters by evaluation cost. The sort is stable, so filters of
/// equal cost keep their token order.
pub fn order_by_cost(filters: &mut [CompiledFilter]) {
    filters.sort_by_key(|filter| filter_cost(filter.kind()));
}

/// Cost levels (lower runs first):
/// - 0: record flags
/// - 1: numeric metrics and single-field comparisons
/// - 2: source-type detection, tag and playlist lookups
/// - 3: text patterns over every searchable field
fn filter_cost(kind: &FilterKind) -> u8 {
    match kind {
        FilterKind::Marked | FilterKind::Untagged | FilterKind::Offline => 0,
        FilterKind::Field { .. } | FilterKind::Count { .. } => 1,
        FilterKind::Unclipped
        | FilterKind::Duration(_)
        | FilterKind::Resolution(_)
        | FilterKind::TypeName { .. }
        | FilterKind::Tag { .. }
        | FilterKind::Playlist { .. } => 2,
        FilterKind::Literal { .. } | FilterKind::FreeText { .. } => 3,
    }
}
