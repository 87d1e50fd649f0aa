//! Structured document loading shared by the OpenAPI and AsyncAPI extractors

use serde_json::Value;
use spec_catalog_common::{CatalogError, Result};

/// Parse JSON or YAML text into a JSON value
///
/// Text that starts like JSON is parsed strictly as JSON so malformed JSON
/// reports a JSON error rather than a confusing YAML one.
pub fn parse_document(content: &str, label: &str) -> Result<Value> {
    let trimmed = content.trim_start();
    let value: Value = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse {} JSON: {}", label, e)))?
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse {} YAML: {}", label, e)))?
    };

    if !value.is_object() {
        return Err(CatalogError::Parse(format!(
            "{} document root must be an object",
            label
        )));
    }

    Ok(value)
}

/// Read a scalar field as text
///
/// YAML turns `version: 1.0` into a number, so numbers and booleans are
/// rendered back to their text. Objects, arrays and null read as absent.
pub fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

/// Text of a string, number or boolean value
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Leading characters of a document, cut on a char boundary
pub fn preview(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}
