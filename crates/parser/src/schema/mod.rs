//! Schema reference resolution
//!
//! [`SchemaResolver`] turns a `#/components/...` reference into a standalone
//! JSON Schema whose references all point into its own `definitions` map.
//! [`ProtocolOperationResolver`] builds on it to resolve AsyncAPI channel
//! operations: transport metadata (topic, queue, exchange) plus the message
//! schemas.
//!
//! ## Usage
//! ```rust,ignore
//! use spec_catalog_parser::schema::{ProtocolOperationResolver, SchemaResolver};
//!
//! let schemas = SchemaResolver::new(&components);
//! let operations = ProtocolOperationResolver::new(&schemas, Some("kafka"));
//! let resolved = operations.resolve("orders", &channel, &subscribe);
//! ```

mod protocol;
mod resolver;

pub use protocol::{
    ProtocolFamily, ProtocolOperationResolver, ResolvedOperation, CLASSIFIER_EXTENSION,
};
pub use resolver::{
    normalize_message, rewrite_reference, ResolvedSchema, SchemaResolver, COMPONENTS_PREFIX,
    DEFINITIONS_PREFIX, JSON_SCHEMA_DRAFT_07,
};

use serde_json::Value;

/// Make a schema found inside a document self-contained
///
/// A `$ref` into the components namespace is resolved; anything else is
/// treated as an embedded schema and has its nested references flattened.
pub fn self_contained(resolver: &SchemaResolver, fallback_name: &str, schema: &Value) -> Value {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        if let Some(resolved) = resolver.resolve(reference) {
            return resolved.schema;
        }
    }
    resolver.resolve_inline(fallback_name, schema).schema
}
