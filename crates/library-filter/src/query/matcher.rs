//! Compiled library queries.

use crate::engine::filter_candidates;
use crate::error::{FilterError, Result};
use crate::lookup::{LibraryView, PlaylistLookup, TagLookup};
use crate::options::{FilterOptions, MalformedNumberPolicy};
use crate::record::LibraryRecord;
use crate::types::{LibraryKind, RecordId};

use super::context::RecordQueryContext;
use super::evaluate::CompiledFilter;
use super::expression::FilterKind;
use super::highlight::derive_highlight_terms;
use super::numeric::NumericComparison;
use super::optimizer::order_by_cost;
use super::parser::classify;

/// A token list classified and compiled for one library.
///
/// Tokens are combined with AND. Compiling once and reusing the query avoids
/// re-classifying tokens and rebuilding text patterns per record.
#[derive(Debug, Clone)]
pub struct LibraryQuery {
    library: LibraryKind,
    filters: Vec<CompiledFilter>,
    options: FilterOptions,
}

impl LibraryQuery {
    /// Compiles `tokens` using the grammar of `library`.
    ///
    /// Only fails when `options.malformed_numbers` is
    /// [`MalformedNumberPolicy::Reject`] and a numeric token carries no
    /// usable number.
    pub fn compile<S: AsRef<str>>(
        library: LibraryKind,
        tokens: &[S],
        options: &FilterOptions,
    ) -> Result<Self> {
        let mut filters = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            let kind = classify(token, library);
            if options.malformed_numbers == MalformedNumberPolicy::Reject
                && kind
                    .comparison()
                    .is_some_and(NumericComparison::is_malformed)
            {
                return Err(FilterError::InvalidNumber(format!(
                    "{token:?} has no usable number"
                )));
            }
            filters.push(CompiledFilter::new(kind, options.text_patterns));
        }
        order_by_cost(&mut filters);

        log::debug!(
            "compiled {} query with {} filter(s)",
            library.as_str(),
            filters.len()
        );

        Ok(Self {
            library,
            filters,
            options: *options,
        })
    }

    /// Compiles `tokens` using the grammar of record type `R`.
    pub fn for_records<R: LibraryRecord, S: AsRef<str>>(
        tokens: &[S],
        options: &FilterOptions,
    ) -> Result<Self> {
        Self::compile(R::KIND, tokens, options)
    }

    pub fn library(&self) -> LibraryKind {
        self.library
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// True when the query has no filters and matches every record.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The classified filters in evaluation order.
    pub fn filters(&self) -> impl Iterator<Item = &FilterKind> + '_ {
        self.filters.iter().map(CompiledFilter::kind)
    }

    /// Returns terms that should be highlighted in results.
    pub fn highlight_terms(&self) -> Vec<String> {
        derive_highlight_terms(self.filters())
    }

    /// Tests one record. Evaluation stops at the first failing filter.
    pub fn matches<R: LibraryRecord>(
        &self,
        record: &R,
        tags: &dyn TagLookup,
        playlists: &dyn PlaylistLookup,
    ) -> bool {
        let context = RecordQueryContext::new(record, tags, playlists);
        self.filters.iter().all(|filter| filter.matches(&context))
    }

    /// Returns the candidates that match, in their original order.
    pub fn filter<R: LibraryRecord>(
        &self,
        candidates: &[RecordId],
        library: &LibraryView<'_, R>,
    ) -> Vec<RecordId> {
        if self.library != R::KIND {
            log::warn!(
                "{} query applied to {} records",
                self.library.as_str(),
                R::KIND.as_str()
            );
        }
        filter_candidates(self, candidates, library)
    }
}
