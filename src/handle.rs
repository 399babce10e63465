//! Active-dataset publication
//!
//! The process keeps one "current" dataset. Replacing it never mutates the
//! store readers already hold: a replacement is fully constructed and
//! validated first, then published by swapping a shared pointer. A failed
//! load leaves the previous dataset active.

use crate::dataset::RecordStore;
use crate::error::AnalyticsError;
use log::info;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Shared handle to the currently active [`RecordStore`].
///
/// Queries clone the inner `Arc` and then run entirely against an immutable
/// store, so in-flight readers are unaffected by a concurrent swap.
#[derive(Debug)]
pub struct StoreHandle {
    inner: RwLock<Arc<RecordStore>>,
}

impl StoreHandle {
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: RwLock::new(Arc::new(store)),
        }
    }

    /// Load the initial dataset from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AnalyticsError> {
        Ok(Self::new(RecordStore::load(path)?))
    }

    /// The currently active store.
    pub fn current(&self) -> Arc<RecordStore> {
        // Lock poisoning only happens if a writer panicked mid-swap, and the
        // swap is a single pointer assignment; recover the value either way.
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the active dataset with a fully constructed store.
    pub fn swap(&self, store: RecordStore) {
        let store = Arc::new(store);
        match self.inner.write() {
            Ok(mut guard) => *guard = store,
            Err(poisoned) => *poisoned.into_inner() = store,
        }
        info!("active dataset swapped");
    }

    /// Load a new dataset file and publish it. On failure the previously
    /// active dataset stays in place.
    pub fn swap_from_path<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalyticsError> {
        let store = RecordStore::load(path)?;
        self.swap(store);
        Ok(())
    }
}
