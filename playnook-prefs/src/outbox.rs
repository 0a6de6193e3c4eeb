//! Outbox for remote preference writes.
//!
//! Remote mutations are queued rather than fired and forgotten, so a
//! transient failure does not silently diverge local and remote state.
//! Each mutation carries a whole-field snapshot; a newer mutation for
//! the same field supersedes any queued one, so the queue never grows
//! past one entry per field.

use std::collections::BTreeMap;
use std::collections::VecDeque;

use crate::record::PreferenceRecord;
use crate::remote::{PrefField, RemoteError, RemoteStore};

/// Delivery attempts per mutation before it is dropped.
pub const MAX_ATTEMPTS: u32 = 3;

/// One queued remote write: a whole-field snapshot.
#[derive(Debug, Clone)]
pub struct Mutation {
    field: PrefField,
    value: serde_json::Value,
}

impl Mutation {
    pub fn favorites(favorites: &BTreeMap<String, bool>) -> Self {
        Self {
            field: PrefField::Favorites,
            value: serde_json::json!(favorites),
        }
    }

    pub fn recently_played(list: &[String]) -> Self {
        Self {
            field: PrefField::RecentlyPlayed,
            value: serde_json::json!(list),
        }
    }

    pub fn field(&self) -> PrefField {
        self.field
    }

    /// A document holding just this mutation's field, used when the
    /// identity has no remote document yet.
    fn as_record(&self) -> PreferenceRecord {
        let mut record = PreferenceRecord::default();
        match self.field {
            PrefField::Favorites => {
                if let Ok(favorites) = serde_json::from_value(self.value.clone()) {
                    record.favorites = favorites;
                }
            }
            PrefField::RecentlyPlayed => {
                if let Ok(list) = serde_json::from_value(self.value.clone()) {
                    record.recently_played = list;
                }
            }
        }
        record
    }
}

/// Queue of pending remote mutations.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Mutation>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Queue a mutation, superseding any pending one for the same field.
    pub fn push(&mut self, mutation: Mutation) {
        self.queue.retain(|m| m.field != mutation.field);
        self.queue.push_back(mutation);
    }

    /// Drain the queue against the remote store.
    ///
    /// A mutation that exhausts [`MAX_ATTEMPTS`] is dropped with a
    /// warning; delivery failure never propagates to the caller.
    pub async fn flush<R: RemoteStore>(&mut self, remote: &R, uid: &str) {
        while let Some(mutation) = self.queue.pop_front() {
            if !deliver(remote, uid, &mutation).await {
                log::warn!(
                    "dropping {} mutation after {MAX_ATTEMPTS} failed attempts",
                    mutation.field().as_str()
                );
            }
        }
    }
}

/// Try to deliver one mutation. An `update` that fails because the
/// document does not exist yet is retried as a create holding just this
/// field.
async fn deliver<R: RemoteStore>(remote: &R, uid: &str, mutation: &Mutation) -> bool {
    for attempt in 1..=MAX_ATTEMPTS {
        match remote.update(uid, mutation.field(), &mutation.value).await {
            Ok(()) => return true,
            Err(RemoteError::NotFound) => {
                match remote.put(uid, &mutation.as_record()).await {
                    Ok(()) => return true,
                    Err(e) => {
                        log::debug!(
                            "create-if-absent for {} failed (attempt {attempt}): {e}",
                            mutation.field().as_str()
                        );
                    }
                }
            }
            Err(e) => {
                log::debug!(
                    "remote {} update failed (attempt {attempt}): {e}",
                    mutation.field().as_str()
                );
            }
        }
    }
    false
}
