//! The collection store: the authoritative, ordered record sequence of one resource kind.
//!
//! [`Collection`] is plain synchronous state. It trusts its own id counter and never
//! re-validates id uniqueness; callers that share it across tasks must serialize access
//! (see the in-memory backend, which keeps one lock per collection).

use chrono::{DateTime, Duration, Utc};

use crate::record::{Record, RecordId};

/// An insertion-ordered sequence of records plus the next-id counter.
///
/// The counter starts one past the largest seed id, only ever moves forward, and is
/// rewound only by [`Collection::reset_to_seed`].
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    records: Vec<R>,
    seed: Vec<R>,
    next_id: RecordId,
    last_stamp: Option<DateTime<Utc>>,
}

impl<R: Record> Collection<R> {
    /// Initializes a collection from its seed records.
    pub fn initialize_from_seed(seed: Vec<R>) -> Self {
        Self {
            records: seed.clone(),
            next_id: first_free_id(&seed),
            seed,
            last_stamp: None,
        }
    }

    /// Returns the current ordered sequence of records.
    pub fn snapshot(&self) -> &[R] {
        &self.records
    }

    /// Returns the number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with the given id.
    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.records
            .iter()
            .find(|record| record.id() == id)
    }

    /// Returns a fresh id and advances the counter by exactly one.
    pub fn next_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Returns the id the next call to [`Collection::next_id`] will hand out.
    pub fn peek_next_id(&self) -> RecordId {
        self.next_id
    }

    /// Appends a record at the end of the sequence.
    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Replaces the record with the given id in place.
    ///
    /// Returns `false` if no such record exists.
    pub fn replace_at(&mut self, id: RecordId, record: R) -> bool {
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes every record matching `predicate`, keeping the order of the rest.
    ///
    /// Returns the removed records in their original order.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&R) -> bool) -> Vec<R> {
        let (removed, kept): (Vec<R>, Vec<R>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|record| predicate(record));
        self.records = kept;
        removed
    }

    /// Discards every mutation and the counter state and reloads the seed records.
    pub fn reset_to_seed(&mut self) {
        self.records = self.seed.clone();
        self.next_id = first_free_id(&self.seed);
    }

    /// Issues a mutation timestamp that is strictly later than every one issued before.
    ///
    /// Returns `now` unless the clock has not moved past the previous stamp.
    pub fn stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.stamp_after(now, None)
    }

    /// Like [`Collection::stamp`], but also strictly later than `previous`, the
    /// modification time the record being updated already carries.
    pub fn stamp_after(&mut self, now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let stamp = match self.last_stamp.max(previous) {
            Some(floor) if now <= floor => floor + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

fn first_free_id<R: Record>(seed: &[R]) -> RecordId {
    seed.iter()
        .map(R::id)
        .max()
        .unwrap_or(0)
        + 1
}
