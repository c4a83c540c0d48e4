//! `key=value` metadata filters for show and delete by metadata.

use std::str::FromStr;

use thiserror::Error;

use super::{Record, value_text};

/// Errors raised while parsing user-supplied metadata filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid metadata filter format: {0} (expected key=value)")]
    MissingSeparator(String),

    #[error("Invalid metadata filter: empty key in '{0}'")]
    EmptyKey(String),
}

/// A single equality filter over a record's top-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFilter {
    pub key: String,
    pub value: String,
}

impl FromStr for MetadataFilter {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| FilterError::MissingSeparator(raw.to_string()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(FilterError::EmptyKey(raw.to_string()));
        }

        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl MetadataFilter {
    /// Parse every filter, failing on the first malformed one.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if any filter lacks `=` or has an empty key.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, FilterError> {
        raw.iter().map(|s| s.as_ref().parse()).collect()
    }

    /// Non-string values are compared by their compact JSON text.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        record
            .metadata
            .get(&self.key)
            .is_some_and(|value| value_text(value) == self.value)
    }

    /// True when the record satisfies every filter.
    #[must_use]
    pub fn all_match(filters: &[Self], record: &Record) -> bool {
        filters.iter().all(|filter| filter.matches(record))
    }
}
