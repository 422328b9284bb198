//! The mutation engine: validated writes against a [`Collection`].
//!
//! Every operation checks everything it needs before it touches the collection, so a
//! rejected mutation leaves the collection exactly as it was.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use restbox_core::{
    collection::Collection,
    error::{RecordStoreError, RecordStoreResult},
    query::Expr,
    record::{Record, RecordId},
};

use crate::evaluator::RecordEvaluator;

/// Tunables for the mutation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationPolicy {
    /// Also check unique fields on replace and merge. Create always checks them.
    pub recheck_unique_on_update: bool,
}

pub fn create<R: Record>(
    collection: &mut Collection<R>,
    draft: R::Draft,
    now: DateTime<Utc>,
) -> RecordStoreResult<R> {
    R::validate_draft(&draft)?;

    let candidate = R::from_draft(collection.peek_next_id(), draft, collection.stamp(now));
    ensure_unique(collection, &candidate, None)?;

    let id = collection.next_id();
    debug_assert_eq!(id, candidate.id());
    collection.append(candidate.clone());

    Ok(candidate)
}

pub fn replace<R: Record>(
    collection: &mut Collection<R>,
    id: RecordId,
    draft: R::Draft,
    now: DateTime<Utc>,
    policy: MutationPolicy,
) -> RecordStoreResult<R> {
    let existing = existing(collection, id)?;
    R::validate_draft(&draft)?;

    let replaced = existing.replaced_by(draft, collection.stamp_after(now, existing.updated_at()));
    commit_update(collection, replaced, policy)
}

pub fn merge<R: Record>(
    collection: &mut Collection<R>,
    id: RecordId,
    patch: R::Patch,
    now: DateTime<Utc>,
    policy: MutationPolicy,
) -> RecordStoreResult<R> {
    let existing = existing(collection, id)?;
    R::validate_patch(&patch)?;

    let merged = existing.merged_with(patch, collection.stamp_after(now, existing.updated_at()));
    commit_update(collection, merged, policy)
}

pub fn delete<R: Record>(collection: &mut Collection<R>, id: RecordId) -> RecordStoreResult<R> {
    collection
        .remove_where(|record| record.id() == id)
        .into_iter()
        .next()
        .ok_or_else(|| RecordStoreError::not_found(id, R::collection_name()))
}

/// Removes the records matching `filter`, or every record if there is none.
pub fn delete_where<R: Record>(
    collection: &mut Collection<R>,
    filter: Option<&Expr<R::Field>>,
) -> RecordStoreResult<usize> {
    let doomed = match filter {
        Some(filter) => RecordEvaluator::filter_records(collection.snapshot(), filter)?
            .into_iter()
            .map(R::id)
            .collect::<HashSet<_>>(),
        None => collection
            .snapshot()
            .iter()
            .map(R::id)
            .collect::<HashSet<_>>(),
    };

    Ok(collection
        .remove_where(|record| doomed.contains(&record.id()))
        .len())
}

fn existing<R: Record>(collection: &Collection<R>, id: RecordId) -> RecordStoreResult<R> {
    collection
        .find(id)
        .cloned()
        .ok_or_else(|| RecordStoreError::not_found(id, R::collection_name()))
}

fn commit_update<R: Record>(
    collection: &mut Collection<R>,
    updated: R,
    policy: MutationPolicy,
) -> RecordStoreResult<R> {
    if policy.recheck_unique_on_update {
        ensure_unique(collection, &updated, Some(updated.id()))?;
    }

    collection.replace_at(updated.id(), updated.clone());

    Ok(updated)
}

fn ensure_unique<R: Record>(
    collection: &Collection<R>,
    candidate: &R,
    skip: Option<RecordId>,
) -> RecordStoreResult<()> {
    let clash = collection
        .snapshot()
        .iter()
        .filter(|other| Some(other.id()) != skip)
        .find_map(|other| candidate.conflict_with(other));

    match clash {
        Some(field) => Err(RecordStoreError::Conflict(format!("{field} already exists"))),
        None => Ok(()),
    }
}
