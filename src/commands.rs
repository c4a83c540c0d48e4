//! Command implementations shared by the CLI and library callers.
//!
//! Every operation takes the store it works on, so the same code runs
//! against the local JSON store, the in-memory store, or a test double.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{DatabaseConfig, DatabaseKind};
use crate::pattern::Pattern;
use crate::record::{MetadataFilter, Record};
use crate::store::StoreBackend;
use crate::store::local::LocalStoreBackend;
use crate::store::memory::MemoryStoreBackend;
use crate::vdoc::{VirtualDocument, VirtualSummary, aggregate, paired_image_collection};

/// Upper bound on records read when a command needs a whole collection.
pub const FULL_SCAN_LIMIT: usize = 10_000;

/// Maximum length for user-provided collection names.
const MAX_NAME_LENGTH: usize = 200;

/// A collection as shown by `collection list`.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub name: String,
    /// Record count, or `None` if the collection could not be read.
    pub records: Option<usize>,
    pub summary: Option<VirtualSummary>,
}

/// A single collection as shown by `collection show`.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetails {
    pub name: String,
    pub records: usize,
    pub summary: VirtualSummary,
    pub sample: Option<Record>,
}

/// Result of a best-effort bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    /// Targets that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl DeleteReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn merge(&mut self, other: DeleteReport) {
        self.deleted.extend(other.deleted);
        self.failed.extend(other.failed);
    }

    /// Every target failed with the same reason.
    fn rejected(targets: &[String], reason: &str) -> Self {
        Self {
            deleted: Vec::new(),
            failed: targets
                .iter()
                .map(|target| (target.clone(), reason.to_string()))
                .collect(),
        }
    }
}

/// Open the store a database entry describes.
#[must_use]
pub fn open_store(db: &DatabaseConfig) -> Box<dyn StoreBackend> {
    match db.kind {
        DatabaseKind::Local => {
            let root = db.data_path();
            debug!(database = %db.name, root = %root.display(), "opening local store");
            Box::new(LocalStoreBackend::new(root))
        }
        DatabaseKind::Memory => {
            debug!(database = %db.name, "opening memory store");
            Box::new(MemoryStoreBackend::with_collections(db.collections.iter().cloned()))
        }
    }
}

/// Validate a user-provided collection name.
///
/// Only allows alphanumeric characters, hyphens, and underscores, so a name
/// can never address anything outside the store.
///
/// # Errors
///
/// Returns an error describing the first problem found.
pub fn validate_collection_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        anyhow::bail!("Collection name cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        anyhow::bail!(
            "Collection name too long: {} chars (max {MAX_NAME_LENGTH})",
            name.len()
        );
    }

    if !name.chars().next().is_some_and(char::is_alphanumeric) {
        anyhow::bail!("Collection name must start with a letter or number");
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '-' && c != '_' {
            anyhow::bail!(
                "Collection name contains invalid character: '{c}' \
                (only letters, numbers, hyphens, and underscores allowed)"
            );
        }
    }

    Ok(())
}

/// List collections with counts and, optionally, virtual summaries.
///
/// A collection that cannot be read is reported with no count rather than
/// failing the whole listing.
///
/// # Errors
///
/// Returns an error if the collection names cannot be listed.
pub fn list_collections(store: &dyn StoreBackend, with_virtual: bool) -> anyhow::Result<Vec<CollectionInfo>> {
    let names = store.list_collections()?;

    Ok(names
        .into_iter()
        .map(|name| {
            let records = match store.count_records(&name) {
                Ok(count) => Some(count),
                Err(e) => {
                    warn!(collection = %name, error = %e, "could not count collection");
                    None
                }
            };

            let summary = if with_virtual && records.is_some() {
                collection_summary(store, &name).ok()
            } else {
                None
            };

            CollectionInfo {
                name,
                records,
                summary,
            }
        })
        .collect())
}

/// Number of collections in the store.
///
/// # Errors
///
/// Returns an error if the collection names cannot be listed.
pub fn count_collections(store: &dyn StoreBackend) -> anyhow::Result<usize> {
    Ok(store.list_collections()?.len())
}

/// Size, virtual structure and first record of one collection.
///
/// # Errors
///
/// Returns an error if the collection does not exist or cannot be read.
pub fn show_collection(store: &dyn StoreBackend, name: &str) -> anyhow::Result<CollectionDetails> {
    validate_collection_name(name)?;
    let records = store.list_records(name, FULL_SCAN_LIMIT)?;
    let sample = records.first().cloned();
    let summary = VirtualSummary::from_documents(&aggregate(records));

    Ok(CollectionDetails {
        name: name.to_string(),
        records: summary.total_records,
        summary,
        sample,
    })
}

/// Virtual structure of one collection.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn collection_summary(store: &dyn StoreBackend, collection: &str) -> anyhow::Result<VirtualSummary> {
    let records = store.list_records(collection, FULL_SCAN_LIMIT)?;
    Ok(VirtualSummary::from_documents(&aggregate(records)))
}

/// Collection names matching a pattern.
///
/// # Errors
///
/// Returns an error if the collection names cannot be listed.
pub fn select_collections(store: &dyn StoreBackend, pattern: &Pattern) -> anyhow::Result<Vec<String>> {
    let selected: Vec<String> = store
        .list_collections()?
        .into_iter()
        .filter(|name| pattern.is_match(name))
        .collect();

    debug!(
        pattern = pattern.as_str(),
        strategy = pattern.strategy(),
        matched = selected.len(),
        "selected collections"
    );
    Ok(selected)
}

/// Delete collections one by one; failures are recorded and skipped.
///
/// Names that fail [`validate_collection_name`] are reported as failures and
/// never reach the store.
pub fn delete_collections(store: &dyn StoreBackend, names: &[String]) -> DeleteReport {
    let mut report = DeleteReport::default();

    for name in names {
        if let Err(e) = validate_collection_name(name) {
            warn!(collection = %name, error = %e, "refusing to delete collection");
            report.failed.push((name.clone(), e.to_string()));
            continue;
        }

        match store.delete_collection(name) {
            Ok(()) => {
                info!(collection = %name, "deleted collection");
                report.deleted.push(name.clone());
            }
            Err(e) => {
                warn!(collection = %name, error = %e, "failed to delete collection");
                report.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Delete every collection in the store.
///
/// # Errors
///
/// Returns an error if the collection names cannot be listed.
pub fn delete_all_collections(store: &dyn StoreBackend) -> anyhow::Result<DeleteReport> {
    let names = store.list_collections()?;
    info!(count = names.len(), "deleting all collections");
    Ok(delete_collections(store, &names))
}

/// Records of a collection in stored order.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn list_documents(store: &dyn StoreBackend, collection: &str, limit: usize) -> anyhow::Result<Vec<Record>> {
    validate_collection_name(collection)?;
    Ok(store.list_records(collection, limit)?)
}

/// Virtual documents of a collection merged with its paired image collection.
///
/// The image collection is read only when it exists and differs from
/// `collection`.
///
/// # Errors
///
/// Returns an error if the main collection cannot be read. A failing image
/// collection is logged and skipped.
pub fn list_virtual_documents(
    store: &dyn StoreBackend,
    collection: &str,
    limit: usize,
) -> anyhow::Result<Vec<VirtualDocument>> {
    validate_collection_name(collection)?;
    let mut records = store.list_records(collection, limit)?;

    let images = paired_image_collection(collection);
    if images != collection && store.has_collection(&images) {
        match store.list_records(&images, limit) {
            Ok(extra) => {
                debug!(collection = %images, count = extra.len(), "merging image collection");
                records.extend(extra);
            }
            Err(e) => warn!(collection = %images, error = %e, "skipping image collection"),
        }
    }

    Ok(aggregate(records))
}

/// A single record by id.
///
/// # Errors
///
/// Returns an error if the collection or record does not exist.
pub fn show_document(store: &dyn StoreBackend, collection: &str, id: &str) -> anyhow::Result<Record> {
    validate_collection_name(collection)?;
    Ok(store.get_record(collection, id)?)
}

/// Records whose top-level metadata satisfies every filter.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn find_by_metadata(
    store: &dyn StoreBackend,
    collection: &str,
    filters: &[MetadataFilter],
) -> anyhow::Result<Vec<Record>> {
    validate_collection_name(collection)?;
    Ok(store
        .list_records(collection, FULL_SCAN_LIMIT)?
        .into_iter()
        .filter(|record| MetadataFilter::all_match(filters, record))
        .collect())
}

/// Records with any selection name matching the pattern.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn select_documents(store: &dyn StoreBackend, collection: &str, pattern: &Pattern) -> anyhow::Result<Vec<Record>> {
    validate_collection_name(collection)?;
    let selected: Vec<Record> = store
        .list_records(collection, FULL_SCAN_LIMIT)?
        .into_iter()
        .filter(|record| pattern.matches_any(record.selection_names()))
        .collect();

    for record in &selected {
        debug!(id = %record.id, name = %record.display_name(), "document matched");
    }

    debug!(
        collection,
        pattern = pattern.as_str(),
        strategy = pattern.strategy(),
        matched = selected.len(),
        "selected documents"
    );
    Ok(selected)
}

/// Number of records in a collection.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn count_documents(store: &dyn StoreBackend, collection: &str) -> anyhow::Result<usize> {
    validate_collection_name(collection)?;
    Ok(store.count_records(collection)?)
}

/// Record counts for several collections, in the order given.
///
/// A collection that cannot be counted carries its error message instead.
#[must_use]
pub fn count_documents_in(
    store: &dyn StoreBackend,
    collections: &[String],
) -> Vec<(String, Result<usize, String>)> {
    collections
        .iter()
        .map(|collection| {
            let count = count_documents(store, collection).map_err(|e| e.to_string());
            if let Err(e) = &count {
                warn!(collection = %collection, error = %e, "could not count collection");
            }
            (collection.clone(), count)
        })
        .collect()
}

/// Delete records by id, one at a time; failures are recorded and skipped.
///
/// An invalid collection name fails every id without touching the store.
pub fn delete_documents(store: &dyn StoreBackend, collection: &str, ids: &[String]) -> DeleteReport {
    if let Err(e) = validate_collection_name(collection) {
        warn!(collection, error = %e, "refusing to delete documents");
        return DeleteReport::rejected(ids, &e.to_string());
    }

    let mut report = DeleteReport::default();

    for id in ids {
        match store.delete_record(collection, id) {
            Ok(()) => {
                info!(collection, id = %id, "deleted document");
                report.deleted.push(id.clone());
            }
            Err(e) => {
                warn!(collection, id = %id, error = %e, "failed to delete document");
                report.failed.push((id.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Delete every record of a collection, keeping the collection itself.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn clear_collection(store: &dyn StoreBackend, collection: &str) -> anyhow::Result<DeleteReport> {
    validate_collection_name(collection)?;
    let ids: Vec<String> = store
        .list_records(collection, FULL_SCAN_LIMIT)?
        .into_iter()
        .map(|record| record.id)
        .collect();

    info!(collection, count = ids.len(), "deleting all documents");
    Ok(delete_documents(store, collection, &ids))
}

/// The parts of one original document, per collection.
///
/// Looks in the collection and its paired image collection. Each entry holds
/// only the members found in that collection.
///
/// # Errors
///
/// Returns an error if the main collection cannot be read or no virtual
/// document has that name.
pub fn find_virtual_document(
    store: &dyn StoreBackend,
    collection: &str,
    original_name: &str,
) -> anyhow::Result<Vec<(String, VirtualDocument)>> {
    validate_collection_name(collection)?;

    let mut targets = vec![collection.to_string()];
    let images = paired_image_collection(collection);
    if images != collection && store.has_collection(&images) {
        targets.push(images);
    }

    let mut located = Vec::new();

    for (position, target) in targets.into_iter().enumerate() {
        let records = match store.list_records(&target, FULL_SCAN_LIMIT) {
            Ok(records) => records,
            Err(e) if position > 0 => {
                warn!(collection = %target, error = %e, "skipping image collection");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(doc) = aggregate(records)
            .into_iter()
            .find(|doc| doc.original_name == original_name)
        {
            located.push((target, doc));
        }
    }

    if located.is_empty() {
        anyhow::bail!("No document named '{original_name}' in collection '{collection}'");
    }

    Ok(located)
}

/// Ids of every chunk and image of one original document, per collection.
///
/// # Errors
///
/// Same as [`find_virtual_document`].
pub fn locate_virtual_document(
    store: &dyn StoreBackend,
    collection: &str,
    original_name: &str,
) -> anyhow::Result<Vec<(String, Vec<String>)>> {
    Ok(find_virtual_document(store, collection, original_name)?
        .into_iter()
        .map(|(target, doc)| (target, doc.members.into_iter().map(|r| r.id).collect()))
        .collect())
}

/// Delete every chunk and image of one original document, across the
/// collection and its paired image collection.
///
/// # Errors
///
/// Returns an error if the document cannot be located.
pub fn delete_virtual_document(
    store: &dyn StoreBackend,
    collection: &str,
    original_name: &str,
) -> anyhow::Result<DeleteReport> {
    let mut report = DeleteReport::default();
    for (target, ids) in locate_virtual_document(store, collection, original_name)? {
        report.merge(delete_documents(store, &target, &ids));
    }
    Ok(report)
}
