//! Stored records and the structured views the engine derives from them.

pub mod filter;
pub mod metadata;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use filter::{FilterError, MetadataFilter};
pub use metadata::ParsedMetadata;

/// Top-level key holding the nested JSON-encoded metadata blob.
pub const NESTED_METADATA_KEY: &str = "metadata";

/// A single stored item: an opaque id, a content blob and a metadata bag.
///
/// The store owns records; the engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Builder-style helper to attach a top-level metadata value.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// A top-level metadata value, if it is a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Decode the nested metadata blob, if any.
    #[must_use]
    pub fn parsed_metadata(&self) -> Option<ParsedMetadata> {
        metadata::extract(self)
    }

    /// Names a record can be selected by, in lookup order.
    ///
    /// Top-level `filename`, nested `filename`, nested `original_filename`,
    /// then top-level `url`.
    #[must_use]
    pub fn selection_names(&self) -> Vec<String> {
        let parsed = self.parsed_metadata();
        let mut names = Vec::new();

        if let Some(filename) = self.str_field("filename") {
            names.push(filename.to_string());
        }
        if let Some(parsed) = &parsed {
            names.extend(parsed.filename.iter().cloned());
            names.extend(parsed.original_filename.iter().cloned());
        }
        if let Some(url) = self.str_field("url") {
            names.push(url.to_string());
        }

        names.retain(|name| !name.is_empty());
        names
    }

    /// Human-facing name: nested filename, url, top-level filename, then id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.parsed_metadata()
            .and_then(|parsed| parsed.filename.or(parsed.original_filename))
            .or_else(|| self.str_field("url").map(str::to_string))
            .or_else(|| self.str_field("filename").map(str::to_string))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Render a metadata value as display text: strings verbatim, everything
/// else as compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Type label for schema-style listings.
#[must_use]
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}
