//! Kind classification for virtual documents.

use std::fmt;

use crate::record::Record;
use crate::vdoc::VirtualDocument;

/// What a virtual document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Slices of a larger text document.
    Chunked,
    /// Images, usually extracted from one PDF.
    ImageBundle,
    /// A record that belongs to nothing larger.
    Standalone,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Chunked => "chunked",
            Self::ImageBundle => "images",
            Self::Standalone => "standalone",
        };
        f.write_str(label)
    }
}

/// Classify a virtual document.
///
/// A declared chunk total always wins, even when some member also looks like
/// an image.
#[must_use]
pub fn classify(vdoc: &VirtualDocument) -> Kind {
    if vdoc.declared_total_chunks > 0 {
        Kind::Chunked
    } else if vdoc.members.iter().any(is_image_record) {
        Kind::ImageBundle
    } else {
        Kind::Standalone
    }
}

/// A record is an image if it has a top-level `image` field or its nested
/// metadata carries `base64_data` or `classification`.
#[must_use]
pub fn is_image_record(record: &Record) -> bool {
    record.has_field("image")
        || record
            .parsed_metadata()
            .is_some_and(|parsed| parsed.has_image_markers())
}
