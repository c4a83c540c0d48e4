//! Local filesystem store: one JSON array of records per collection.

use std::fs;
use std::path::{Path, PathBuf};

use crate::record::Record;
use crate::store::{StoreBackend, StoreError};

const COLLECTION_EXTENSION: &str = "json";

/// Store backend over a directory of `<collection>.json` files.
pub struct LocalStoreBackend {
    root: PathBuf,
}

impl LocalStoreBackend {
    /// Create a new local store rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a collection. Names that could leave the root are refused.
    fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        if collection.is_empty()
            || collection.contains(['/', '\\'])
            || collection.contains("..")
        {
            return Err(StoreError::InvalidName(collection.to_string()));
        }
        Ok(self.root.join(format!("{collection}.{COLLECTION_EXTENSION}")))
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let path = self.collection_path(collection)?;

        if !path.exists() {
            return Err(StoreError::CollectionNotFound(collection.to_string()));
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| StoreError::ReadError(format!("{}: {e}", path.display())))?;

        serde_json::from_str(&contents)
            .map_err(|e| StoreError::ParseError(format!("{}: {e}", path.display())))
    }

    /// Replace the full contents of a collection, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be serialized or written.
    pub fn write_collection(&self, collection: &str, records: &[Record]) -> Result<(), StoreError> {
        let path = self.collection_path(collection)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::WriteError(format!("create dir {}: {e}", self.root.display()))
        })?;

        let contents = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::SerializeError(e.to_string()))?;

        fs::write(&path, contents)
            .map_err(|e| StoreError::WriteError(format!("{}: {e}", path.display())))
    }
}

impl StoreBackend for LocalStoreBackend {
    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| StoreError::ReadError(format!("{}: {e}", self.root.display())))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().is_some_and(|ext| ext == COLLECTION_EXTENSION)
            })
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();

        names.sort();
        Ok(names)
    }

    fn list_records(&self, collection: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        let mut records = self.read_collection(collection)?;
        records.truncate(limit);
        Ok(records)
    }

    fn get_record(&self, collection: &str, id: &str) -> Result<Record, StoreError> {
        self.read_collection(collection)?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    fn delete_record(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut records = self.read_collection(collection)?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Err(StoreError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        self.write_collection(collection, &records)
    }

    fn delete_collection(&self, collection: &str) -> Result<(), StoreError> {
        let path = self.collection_path(collection)?;

        if !path.exists() {
            return Err(StoreError::CollectionNotFound(collection.to_string()));
        }

        fs::remove_file(&path)
            .map_err(|e| StoreError::WriteError(format!("{}: {e}", path.display())))
    }
}
