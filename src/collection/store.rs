//! Shared accumulator for endpoint records
//!
//! Endpoint pages finish in whatever order their fetches complete. Each
//! record is appended together with the position of its link on the index
//! page, so the finished collection can be put back in discovery order.

use crate::collection::record::EndpointRecord;
use crate::collection::Collection;
use crate::config::ItemOrder;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct StoredEndpoint {
    discovery_index: usize,
    record: EndpointRecord,
}

/// Thread-safe, append-only store of endpoint records
///
/// `append` takes `&self`, so the store can be shared behind an `Arc` by
/// any number of tasks.
#[derive(Debug, Default)]
pub struct CollectionStore {
    entries: Mutex<Vec<StoredEndpoint>>,
}

impl CollectionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredEndpoint>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a record found at `discovery_index` on the index page
    pub fn append(&self, discovery_index: usize, record: EndpointRecord) {
        self.lock().push(StoredEndpoint {
            discovery_index,
            record,
        });
    }

    /// Number of records appended so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consumes the store and produces the finished collection
    ///
    /// With [`ItemOrder::Discovery`] items are sorted by discovery index
    /// (stable, so repeated links keep their completion order). With
    /// [`ItemOrder::Completion`] they stay in append order.
    pub fn finalize(self, name: &str, order: ItemOrder) -> Collection {
        let mut entries = self
            .entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if order == ItemOrder::Discovery {
            entries.sort_by_key(|entry| entry.discovery_index);
        }

        Collection {
            name: name.to_string(),
            items: entries.into_iter().map(|entry| entry.record).collect(),
        }
    }
}
