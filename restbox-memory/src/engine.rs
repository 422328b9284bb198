//! The query engine: a pure function from a collection snapshot and a query to a result.
//!
//! Steps run strictly in order: equality filter, free-text search, stable sort,
//! pagination. The snapshot is never modified and records are only cloned once they
//! are known to be part of the returned result.

use restbox_core::{
    error::RecordStoreResult,
    page::{Listing, Page},
    query::{Filter, Pagination, Query, Sort, SortDirection},
    record::Record,
};

use crate::evaluator::RecordEvaluator;

/// Runs `query` against `records`.
///
/// # Example
///
/// ```ignore
/// let listing = engine::execute(collection.snapshot(), &query)?;
/// ```
pub fn execute<R: Record>(records: &[R], query: &Query<R::Field>) -> RecordStoreResult<Listing<R>> {
    let mut matched = match &query.filter {
        Some(filter) => RecordEvaluator::filter_records(records, filter)?,
        None => records.iter().collect::<Vec<_>>(),
    };

    if let Some(term) = &query.search {
        matched = RecordEvaluator::filter_records(matched, &Filter::search::<R::Field>(term))?;
    }

    if let Some(sort) = &query.sort {
        sort_records(&mut matched, sort);
    }

    Ok(match query.pagination {
        Pagination::Unbounded => Listing::Items(
            matched
                .into_iter()
                .cloned()
                .collect()
        ),
        Pagination::Capped(limit) => Listing::Items(
            matched
                .into_iter()
                .take(limit)
                .cloned()
                .collect()
        ),
        Pagination::Windowed(params) => {
            let page = params.paginate(matched);

            Listing::Page(Page {
                items: page.items.into_iter().cloned().collect(),
                pagination: page.pagination,
            })
        }
    })
}

/// Stable sort by one field. Descending reverses the comparator, so ties keep their
/// relative order in both directions.
pub fn sort_records<R: Record>(records: &mut [&R], sort: &Sort<R::Field>) {
    records.sort_by(|a, b| {
        let left = a.field(sort.field);
        let right = b.field(sort.field);

        match sort.direction {
            SortDirection::Asc => left.compare(&right),
            SortDirection::Desc => right.compare(&left),
        }
    });
}
