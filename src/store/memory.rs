//! In-memory store, used by the `memory` database type and by tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::record::Record;
use crate::store::{StoreBackend, StoreError};

type Collections = BTreeMap<String, Vec<Record>>;

#[derive(Default)]
pub struct MemoryStoreBackend {
    collections: Mutex<Collections>,
}

impl MemoryStoreBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the named collections, all empty.
    pub fn with_collections<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collections = names.into_iter().map(|n| (n.into(), Vec::new())).collect();
        Self {
            collections: Mutex::new(collections),
        }
    }

    /// Append records to a collection, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the lock is poisoned.
    pub fn insert(&self, collection: &str, records: impl IntoIterator<Item = Record>) -> Result<(), StoreError> {
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .extend(records);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

fn not_found(collection: &str) -> StoreError {
    StoreError::CollectionNotFound(collection.to_string())
}

impl StoreBackend for MemoryStoreBackend {
    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn list_records(&self, collection: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        let collections = self.lock()?;
        let records = collections.get(collection).ok_or_else(|| not_found(collection))?;
        Ok(records.iter().take(limit).cloned().collect())
    }

    fn get_record(&self, collection: &str, id: &str) -> Result<Record, StoreError> {
        let collections = self.lock()?;
        collections
            .get(collection)
            .ok_or_else(|| not_found(collection))?
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    fn delete_record(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.lock()?;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection))?;

        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| StoreError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        records.remove(position);
        Ok(())
    }

    fn delete_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.lock()?
            .remove(collection)
            .map(|_| ())
            .ok_or_else(|| not_found(collection))
    }

    fn count_records(&self, collection: &str) -> Result<usize, StoreError> {
        self.lock()?
            .get(collection)
            .map(Vec::len)
            .ok_or_else(|| not_found(collection))
    }
}
