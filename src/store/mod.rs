//! Store backend trait and implementations.
//!
//! The engine never talks to a vector database directly; it reads records and
//! collection names through [`StoreBackend`]. Two backends ship in-tree: a
//! local directory of JSON collection files and an in-memory store.

pub mod local;
pub mod memory;

use crate::record::Record;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Record '{id}' not found in collection '{collection}'")]
    RecordNotFound { collection: String, id: String },

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to write: {0}")]
    WriteError(String),

    #[error("Failed to parse collection: {0}")]
    ParseError(String),

    #[error("Failed to serialize: {0}")]
    SerializeError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid collection name: '{0}'")]
    InvalidName(String),
}

/// Trait for record stores (local files, in-memory, remote databases).
pub trait StoreBackend: Send + Sync {
    /// Names of every collection, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection listing cannot be read.
    fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Up to `limit` records of a collection, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CollectionNotFound` if the collection does not
    /// exist, or another `StoreError` if it cannot be read.
    fn list_records(&self, collection: &str, limit: usize) -> Result<Vec<Record>, StoreError>;

    /// A single record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecordNotFound` if no record has that id.
    fn get_record(&self, collection: &str, id: &str) -> Result<Record, StoreError>;

    /// Delete a single record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecordNotFound` if no record has that id, or a
    /// write error if the change cannot be persisted.
    fn delete_record(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Delete a whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CollectionNotFound` if it does not exist.
    fn delete_collection(&self, collection: &str) -> Result<(), StoreError>;

    /// Number of records in a collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be read.
    fn count_records(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.list_records(collection, usize::MAX)?.len())
    }

    /// Check if a collection exists.
    fn has_collection(&self, collection: &str) -> bool {
        self.list_collections()
            .is_ok_and(|names| names.iter().any(|name| name == collection))
    }
}
