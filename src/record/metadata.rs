//! Extraction of the nested JSON metadata blob.
//!
//! Ingestion tools store chunk and image bookkeeping as a JSON-encoded string
//! under the top-level `metadata` key. The extractor decodes that string into
//! a closed set of recognized fields plus a bag of everything else, so the
//! grouping and classification code never inspects raw JSON types.

use serde_json::{Map, Value};

use super::{NESTED_METADATA_KEY, Record};

/// Decoded nested metadata with recognized fields split out.
///
/// A recognized key whose value has an unexpected JSON type stays in
/// [`ParsedMetadata::extra`] rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMetadata {
    pub original_filename: Option<String>,
    pub filename: Option<String>,
    pub is_chunked: Option<bool>,
    pub total_chunks: Option<u64>,
    pub chunk_index: Option<u64>,
    pub pdf_filename: Option<String>,
    /// Raw `base64_data` value; only its presence matters to the engine.
    pub base64_data: Option<Value>,
    /// Raw `classification` value; only its presence matters to the engine.
    pub classification: Option<Value>,
    pub extra: Map<String, Value>,
}

/// Decode the nested metadata of a record.
///
/// Returns `None` when the key is absent, is not a string, or does not hold a
/// JSON object. None of these are errors: callers fall through to the
/// lower-priority heuristics.
#[must_use]
pub fn extract(record: &Record) -> Option<ParsedMetadata> {
    let raw = record.metadata.get(NESTED_METADATA_KEY)?.as_str()?;

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(ParsedMetadata::from_map(map)),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(record = %record.id, %err, "nested metadata is not valid JSON");
            None
        }
    }
}

impl ParsedMetadata {
    /// Split a decoded JSON object into recognized fields and the rest.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut parsed = Self::default();

        for (key, value) in map {
            let leftover = match key.as_str() {
                "original_filename" => take_string(value, &mut parsed.original_filename),
                "filename" => take_string(value, &mut parsed.filename),
                "pdf_filename" => take_string(value, &mut parsed.pdf_filename),
                "is_chunked" => match value {
                    Value::Bool(b) => {
                        parsed.is_chunked = Some(b);
                        None
                    }
                    other => Some(other),
                },
                "total_chunks" => take_count(value, &mut parsed.total_chunks),
                "chunk_index" => take_count(value, &mut parsed.chunk_index),
                "base64_data" => {
                    parsed.base64_data = Some(value);
                    None
                }
                "classification" => {
                    parsed.classification = Some(value);
                    None
                }
                _ => Some(value),
            };

            if let Some(value) = leftover {
                parsed.extra.insert(key, value);
            }
        }

        parsed
    }

    /// Reassemble the full decoded object, recognized fields included.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();

        let strings = [
            ("original_filename", &self.original_filename),
            ("filename", &self.filename),
            ("pdf_filename", &self.pdf_filename),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if let Some(is_chunked) = self.is_chunked {
            map.insert("is_chunked".to_string(), Value::Bool(is_chunked));
        }
        if let Some(total) = self.total_chunks {
            map.insert("total_chunks".to_string(), Value::from(total));
        }
        if let Some(index) = self.chunk_index {
            map.insert("chunk_index".to_string(), Value::from(index));
        }
        if let Some(data) = &self.base64_data {
            map.insert("base64_data".to_string(), data.clone());
        }
        if let Some(classification) = &self.classification {
            map.insert("classification".to_string(), classification.clone());
        }

        map
    }

    /// True when the record is a chunk of a larger document.
    #[must_use]
    pub fn is_chunk(&self) -> bool {
        self.is_chunked == Some(true)
    }

    /// True when the metadata carries image payload or image classification.
    #[must_use]
    pub fn has_image_markers(&self) -> bool {
        self.base64_data.is_some() || self.classification.is_some()
    }
}

fn take_string(value: Value, slot: &mut Option<String>) -> Option<Value> {
    match value {
        Value::String(s) => {
            *slot = Some(s);
            None
        }
        other => Some(other),
    }
}

// Some writers emit counts as floats (`3.0`); accept whole non-negative values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn take_count(value: Value, slot: &mut Option<u64>) -> Option<Value> {
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    });

    match count {
        Some(count) => {
            *slot = Some(count);
            None
        }
        None => Some(value),
    }
}
