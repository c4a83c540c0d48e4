//! Per-collection virtual structure summary.

use serde::Serialize;

use crate::vdoc::{Kind, VirtualDocument, classify};

/// Counts describing how a collection's records group into virtual documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VirtualSummary {
    pub total_records: usize,
    pub virtual_documents: usize,
    pub chunked_documents: usize,
    /// Records that belong to chunked documents.
    pub total_chunks: usize,
    /// Records that belong to image bundles.
    pub total_images: usize,
    /// Images grouped under a PDF source.
    pub image_stacks: usize,
    /// Images with no PDF source.
    pub standalone_images: usize,
    pub standalone_documents: usize,
}

impl VirtualSummary {
    /// Summarize already-aggregated documents.
    #[must_use]
    pub fn from_documents(docs: &[VirtualDocument]) -> Self {
        let mut summary = Self {
            virtual_documents: docs.len(),
            ..Self::default()
        };

        for doc in docs {
            summary.total_records += doc.len();
            match classify(doc) {
                Kind::Chunked => {
                    summary.chunked_documents += 1;
                    summary.total_chunks += doc.len();
                }
                Kind::ImageBundle => {
                    summary.total_images += doc.len();
                    if doc.group_key.contains(".pdf") {
                        summary.image_stacks += doc.len();
                    } else {
                        summary.standalone_images += doc.len();
                    }
                }
                Kind::Standalone => summary.standalone_documents += 1,
            }
        }

        summary
    }
}
