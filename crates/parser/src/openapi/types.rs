//! OpenAPI 3.x type definitions
//!
//! Simplified representation focusing on operation extraction. Paths and
//! content maps stay as raw JSON so document order and unknown keys survive.

use crate::document::scalar_text;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// HTTP verbs recognized as operations inside a path item
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "head", "options"];

/// OpenAPI document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g., "3.0.0"), kept as text even when YAML reads a number
    #[serde(default, deserialize_with = "lenient_text")]
    pub openapi: Option<String>,

    /// API metadata, kept verbatim
    #[serde(default)]
    pub info: Option<Value>,

    /// Servers, kept verbatim
    #[serde(default)]
    pub servers: Option<Value>,

    /// Path items keyed by route
    #[serde(default)]
    pub paths: Map<String, Value>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Value>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    /// Parameters, possibly `$ref`s into `components.parameters`
    #[serde(default)]
    pub parameters: Vec<Value>,

    /// Request body, possibly a `$ref` into `components.requestBodies`
    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<Value>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: Map<String, Value>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameter definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Value>,

    /// Swagger 2.0 style inline type
    #[serde(rename = "type")]
    #[serde(default)]
    pub param_type: Option<String>,
}

impl Parameter {
    /// Declared type, defaulting to "string"
    pub fn declared_type(&self) -> String {
        self.schema
            .as_ref()
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| self.param_type.clone())
            .unwrap_or_else(|| "string".to_string())
    }
}

/// Request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    /// Content types in document order
    #[serde(default)]
    pub content: Map<String, Value>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    /// Content types in document order
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Accept a string, number or boolean where text is expected
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

/// First media type of a content map and its schema, if any
pub fn first_media_type(content: &Map<String, Value>) -> Option<(&str, Option<&Value>)> {
    content
        .iter()
        .next()
        .map(|(media_type, body)| (media_type.as_str(), body.get("schema")))
}

/// Follow a local `$ref` (`#/...`) within the document, if the value is one
///
/// Unresolvable references yield the value unchanged.
pub fn deref<'a>(value: &'a Value, root: &'a Value) -> &'a Value {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix('#'))
        .and_then(|pointer| root.pointer(pointer))
        .unwrap_or(value)
}
