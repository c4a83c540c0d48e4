//! Partition a flat record set into virtual documents.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::record::Record;
use crate::vdoc::group;

/// A reconstructed logical document: the chunks and/or extracted images of
/// one originally ingested file.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualDocument {
    pub group_key: String,
    pub original_name: String,
    /// Chunk count advertised by chunk metadata. Not guaranteed to equal
    /// `members.len()`: chunks may have been deleted from the store since.
    pub declared_total_chunks: u64,
    /// Records in first-seen order.
    pub members: Vec<Record>,
    pub representative_metadata: Map<String, Value>,
}

impl VirtualDocument {
    fn seed(key: String, declared_total_chunks: u64, first: Record, metadata: Map<String, Value>) -> Self {
        Self {
            original_name: key.clone(),
            group_key: key,
            declared_total_chunks,
            members: vec![first],
            representative_metadata: metadata,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Ids of every member, in member order.
    #[must_use]
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Group records into virtual documents sorted by `original_name`.
///
/// Every input record lands in exactly one document. Repeated records are not
/// deduplicated; merging overlapping record streams is the caller's concern.
#[must_use]
pub fn aggregate<I>(records: I) -> Vec<VirtualDocument>
where
    I: IntoIterator<Item = Record>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut docs: Vec<VirtualDocument> = Vec::new();

    for record in records {
        let parsed = record.parsed_metadata();
        let resolution = group::resolve(&record, parsed.as_ref());
        tracing::trace!(record = %record.id, key = %resolution.key, rule = resolution.rule, "resolved group");

        if let Some(&slot) = index.get(&resolution.key) {
            let doc = &mut docs[slot];
            doc.declared_total_chunks = doc.declared_total_chunks.max(resolution.declared_total_chunks);
            doc.members.push(record);
            continue;
        }

        let metadata = parsed.map_or_else(|| record.metadata.clone(), |p| p.to_map());
        index.insert(resolution.key.clone(), docs.len());
        docs.push(VirtualDocument::seed(
            resolution.key,
            resolution.declared_total_chunks,
            record,
            metadata,
        ));
    }

    docs.sort_by(|a, b| a.original_name.cmp(&b.original_name));
    docs
}
