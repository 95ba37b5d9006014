use std::slice;

use tracing::{debug, trace};

use super::entities::MetricEntry;

/// Ordered log of daily entries for a single session.
///
/// Entries keep the order they were appended in, which is expected to be chronological. Nothing
/// is ever reordered or deduplicated, the only way to remove entries is [RecordStore::clear].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    entries: Vec<MetricEntry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries` in the given order.
    pub fn with_entries(entries: impl IntoIterator<Item = MetricEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.append(entry);
        }
        store
    }

    /// Adds `entry` after every existing one. The entry isn't validated in any way.
    ///
    /// Running out of memory here aborts the process, there is no way to continue a session
    /// that can't hold its records.
    pub fn append(&mut self, entry: MetricEntry) {
        trace!("Appending {entry:?}");
        self.entries.push(entry);
        debug!("Store holds {} entries", self.entries.len());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> slice::Iter<'_, MetricEntry> {
        self.entries.iter()
    }

    /// Drops every entry and gives the memory back. The store behaves like a new one afterwards.
    pub fn clear(&mut self) {
        let released = std::mem::take(&mut self.entries);
        debug!("Released {} entries", released.len());
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a MetricEntry;
    type IntoIter = slice::Iter<'a, MetricEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
