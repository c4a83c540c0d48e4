//! Group-key resolution: which logical document does a record belong to?
//!
//! Resolution is an ordered list of named rules evaluated with early exit.
//! A rule whose inputs are missing simply does not match; the last rule
//! always matches, so every record gets a non-empty key.

use crate::record::{ParsedMetadata, Record};

/// Key assigned when no rule produces a better one.
pub const FALLBACK_GROUP_KEY: &str = "Unknown Image";

const PDF_URL_SCHEME: &str = "pdf://";
const PDF_FILENAME_MARKER: &str = ".pdf_";

/// Outcome of resolving one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub key: String,
    /// Chunk total advertised by the record; 0 when it is not a chunk.
    pub declared_total_chunks: u64,
    /// Name of the rule that produced the key.
    pub rule: &'static str,
}

/// Inputs a rule may inspect.
pub struct RuleInput<'a> {
    pub record: &'a Record,
    pub parsed: Option<&'a ParsedMetadata>,
}

/// One predicate+extractor pair in the resolution chain.
pub struct GroupRule {
    pub name: &'static str,
    resolve: fn(&RuleInput<'_>) -> Option<(String, u64)>,
}

impl GroupRule {
    #[must_use]
    pub fn apply(&self, input: &RuleInput<'_>) -> Option<Resolution> {
        (self.resolve)(input).map(|(key, declared_total_chunks)| Resolution {
            key,
            declared_total_chunks,
            rule: self.name,
        })
    }
}

/// The resolution chain, highest priority first.
pub const RULES: &[GroupRule] = &[
    GroupRule {
        name: "chunk_original_filename",
        resolve: chunk_original_filename,
    },
    GroupRule {
        name: "pdf_filename",
        resolve: pdf_filename,
    },
    GroupRule {
        name: "pdf_url",
        resolve: pdf_url,
    },
    GroupRule {
        name: "pdf_image_filename",
        resolve: pdf_image_filename,
    },
    GroupRule {
        name: "url",
        resolve: url,
    },
    GroupRule {
        name: "filename",
        resolve: filename,
    },
    GroupRule {
        name: "fallback",
        resolve: fallback,
    },
];

/// Resolve the group key for a record.
///
/// `parsed` is the record's nested metadata, if the caller already decoded it.
#[must_use]
pub fn resolve(record: &Record, parsed: Option<&ParsedMetadata>) -> Resolution {
    let input = RuleInput { record, parsed };

    RULES
        .iter()
        .find_map(|rule| rule.apply(&input))
        .unwrap_or_else(|| Resolution {
            key: FALLBACK_GROUP_KEY.to_string(),
            declared_total_chunks: 0,
            rule: "fallback",
        })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn chunk_original_filename(input: &RuleInput<'_>) -> Option<(String, u64)> {
    let parsed = input.parsed.filter(|p| p.is_chunk())?;
    let key = non_empty(parsed.original_filename.as_deref())?;
    Some((key, parsed.total_chunks.unwrap_or(0)))
}

fn pdf_filename(input: &RuleInput<'_>) -> Option<(String, u64)> {
    let parsed = input.parsed?;
    let key = non_empty(parsed.pdf_filename.as_deref())?;
    Some((key, parsed.total_chunks.unwrap_or(0)))
}

// pdf://doc.pdf/page_4/image_1 -> doc.pdf
fn pdf_url(input: &RuleInput<'_>) -> Option<(String, u64)> {
    let rest = input.record.str_field("url")?.strip_prefix(PDF_URL_SCHEME)?;
    let document = rest.split('/').next()?;
    non_empty(Some(document)).map(|key| (key, 0))
}

// doc.pdf_page_4_image_1.png -> doc.pdf
fn pdf_image_filename(input: &RuleInput<'_>) -> Option<(String, u64)> {
    let name = input.record.str_field("filename")?;
    let (stem, _) = name.split_once(PDF_FILENAME_MARKER)?;
    Some((format!("{stem}.pdf"), 0))
}

fn url(input: &RuleInput<'_>) -> Option<(String, u64)> {
    non_empty(input.record.str_field("url")).map(|key| (key, 0))
}

fn filename(input: &RuleInput<'_>) -> Option<(String, u64)> {
    non_empty(input.record.str_field("filename")).map(|key| (key, 0))
}

#[allow(clippy::unnecessary_wraps)]
fn fallback(_input: &RuleInput<'_>) -> Option<(String, u64)> {
    Some((FALLBACK_GROUP_KEY.to_string(), 0))
}
