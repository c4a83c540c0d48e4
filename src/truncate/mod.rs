//! Content-aware truncation for console display.
//!
//! Every entry point takes a [`TruncationPolicy`] and checks
//! `policy.disabled` before doing anything else.

use serde_json::{Map, Value};

/// Field names whose values are usually encoded payloads.
const BINARY_FIELD_NAMES: &[&str] = &[
    "image",
    "base64_data",
    "data",
    "content",
    "payload",
    "attachment",
    "file_data",
    "binary_data",
    "encoded_data",
];

/// Minimum length before content is considered for base64 detection.
const BASE64_MIN_LEN: usize = 100;

/// Share of base64-alphabet characters above which content is base64.
const BASE64_RATIO: f64 = 0.9;

/// Values inside JSON metadata longer than this are cut to a few lines.
const JSON_VALUE_MAX_CHARS: usize = 500;
const JSON_VALUE_MAX_LINES: usize = 3;

pub const DEFAULT_LINE_LIMIT: usize = 5;
pub const DEFAULT_BASE64_CHAR_LIMIT: usize = 200;

/// How aggressively to shorten values for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPolicy {
    /// When set, every value passes through untouched.
    pub disabled: bool,
    /// Maximum lines for line-based truncation; 0 means unlimited.
    pub line_limit: usize,
    /// Maximum characters kept from base64-like values.
    pub base64_char_limit: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            disabled: false,
            line_limit: DEFAULT_LINE_LIMIT,
            base64_char_limit: DEFAULT_BASE64_CHAR_LIMIT,
        }
    }
}

impl TruncationPolicy {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_limit(self, line_limit: usize) -> Self {
        Self { line_limit, ..self }
    }
}

/// Shorten `value` according to the field it came from and its content.
#[must_use]
pub fn truncate(value: &str, field_name: &str, policy: &TruncationPolicy) -> String {
    if policy.disabled {
        return value.to_string();
    }

    if field_name == "metadata" {
        return truncate_json_metadata(value, policy);
    }

    if is_binary_field(field_name) || looks_like_base64(value) {
        return truncate_chars(value, policy.base64_char_limit, policy);
    }

    truncate_lines(value, policy.line_limit, policy)
}

/// Keep the first `max_lines` lines and note how many were dropped.
#[must_use]
pub fn truncate_lines(value: &str, max_lines: usize, policy: &TruncationPolicy) -> String {
    if policy.disabled || max_lines == 0 {
        return value.to_string();
    }

    let lines: Vec<&str> = value.split('\n').collect();
    if lines.len() <= max_lines {
        return value.to_string();
    }

    let omitted = lines.len() - max_lines;
    format!(
        "{}\n... (truncated, {omitted} more lines)",
        lines[..max_lines].join("\n")
    )
}

/// Keep the first `max_chars` characters and note how many were dropped.
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize, policy: &TruncationPolicy) -> String {
    if policy.disabled {
        return value.to_string();
    }

    let total = value.chars().count();
    if total <= max_chars {
        return value.to_string();
    }

    let kept: String = value.chars().take(max_chars).collect();
    format!("{kept}... (truncated, {} more characters)", total - max_chars)
}

/// Pretty-print JSON metadata with each value shortened, then cap its lines.
///
/// Input that is not a JSON object is line-truncated as plain text.
#[must_use]
pub fn truncate_json_metadata(value: &str, policy: &TruncationPolicy) -> String {
    if policy.disabled {
        return value.to_string();
    }

    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(value) else {
        return truncate_lines(value, policy.line_limit, policy);
    };

    let shortened = Value::Object(truncate_map(map, policy));
    match serde_json::to_string_pretty(&shortened) {
        Ok(pretty) => truncate_lines(&pretty, policy.line_limit, policy),
        Err(_) => truncate_lines(value, policy.line_limit, policy),
    }
}

fn truncate_map(map: Map<String, Value>, policy: &TruncationPolicy) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key, truncate_json_value(value, policy)))
        .collect()
}

fn truncate_json_value(value: Value, policy: &TruncationPolicy) -> Value {
    match value {
        Value::Object(map) => Value::Object(truncate_map(map, policy)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| truncate_json_value(item, policy))
                .collect(),
        ),
        Value::String(s) if looks_like_base64(&s) => {
            Value::String(truncate_chars(&s, policy.base64_char_limit, policy))
        }
        Value::String(s) if s.chars().count() > JSON_VALUE_MAX_CHARS => {
            Value::String(truncate_lines(&s, JSON_VALUE_MAX_LINES, policy))
        }
        other => other,
    }
}

/// Case-insensitive substring match against the known payload field names.
#[must_use]
pub fn is_binary_field(field_name: &str) -> bool {
    let lower = field_name.to_lowercase();
    BINARY_FIELD_NAMES.iter().any(|name| lower.contains(name))
}

/// Long content that is a data URL or mostly base64 alphabet.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn looks_like_base64(content: &str) -> bool {
    let total = content.chars().count();
    if total < BASE64_MIN_LEN {
        return false;
    }
    if content.starts_with("data:") {
        return true;
    }

    let alphabet = content
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .count();

    alphabet as f64 / total as f64 > BASE64_RATIO
}
