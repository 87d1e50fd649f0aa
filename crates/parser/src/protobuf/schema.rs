//! JSON Schema generation from protobuf message descriptors
//!
//! Nested messages are collected into `definitions` keyed by their fully
//! qualified name and referenced with `#/definitions/<full name>`. Recursive
//! messages terminate because each name is expanded at most once.

use crate::schema::{DEFINITIONS_PREFIX, JSON_SCHEMA_DRAFT_07};
use prost_reflect::{Cardinality, FieldDescriptor, Kind, MessageDescriptor};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Build a self-contained JSON schema for a message
pub fn message_schema(message: &MessageDescriptor, id_prefix: &str) -> Value {
    let mut builder = SchemaBuilder::default();
    let body = builder.object(message);

    let mut schema = Map::new();
    schema.insert("$schema".to_string(), json!(JSON_SCHEMA_DRAFT_07));
    schema.insert(
        "$id".to_string(),
        json!(format!("{}{}", id_prefix, message.full_name())),
    );
    schema.insert("title".to_string(), json!(message.name()));
    if let Value::Object(body) = body {
        schema.extend(body);
    }
    if !builder.definitions.is_empty() {
        schema.insert(
            "definitions".to_string(),
            Value::Object(builder.definitions),
        );
    }
    Value::Object(schema)
}

#[derive(Default)]
struct SchemaBuilder {
    definitions: Map<String, Value>,
    visited: HashSet<String>,
}

impl SchemaBuilder {
    fn object(&mut self, message: &MessageDescriptor) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in message.fields() {
            if field.cardinality() == Cardinality::Required {
                required.push(Value::String(field.json_name().to_string()));
            }
            properties.insert(field.json_name().to_string(), self.field(&field));
        }

        let mut object = Map::new();
        object.insert("type".to_string(), json!("object"));
        object.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            object.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(object)
    }

    fn field(&mut self, field: &FieldDescriptor) -> Value {
        if field.is_map() {
            if let Kind::Message(entry) = field.kind() {
                let values = self.kind(&entry.map_entry_value_field().kind());
                return json!({ "type": "object", "additionalProperties": values });
            }
        }

        let item = self.kind(&field.kind());
        if field.is_list() {
            json!({ "type": "array", "items": item })
        } else {
            item
        }
    }

    fn kind(&mut self, kind: &Kind) -> Value {
        match kind {
            Kind::Double | Kind::Float => json!({ "type": "number" }),
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => {
                json!({ "type": "integer", "format": "int32" })
            }
            Kind::Uint32 | Kind::Fixed32 => json!({ "type": "integer", "format": "uint32" }),
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => {
                json!({ "type": "integer", "format": "int64" })
            }
            Kind::Uint64 | Kind::Fixed64 => json!({ "type": "integer", "format": "uint64" }),
            Kind::Bool => json!({ "type": "boolean" }),
            Kind::String => json!({ "type": "string" }),
            Kind::Bytes => json!({ "type": "string", "format": "byte" }),
            Kind::Enum(descriptor) => {
                let names: Vec<String> = descriptor.values().map(|v| v.name().to_string()).collect();
                json!({ "type": "string", "enum": names })
            }
            Kind::Message(message) => self.reference(message),
        }
    }

    fn reference(&mut self, message: &MessageDescriptor) -> Value {
        if let Some(schema) = well_known_schema(message.full_name()) {
            return schema;
        }

        let name = message.full_name().to_string();
        if self.visited.insert(name.clone()) {
            let body = self.object(message);
            self.definitions.insert(name.clone(), body);
        }
        json!({ "$ref": format!("{}{}", DEFINITIONS_PREFIX, name) })
    }
}

/// JSON mapping of the google.protobuf well-known types
fn well_known_schema(full_name: &str) -> Option<Value> {
    let schema = match full_name {
        "google.protobuf.Timestamp" => json!({ "type": "string", "format": "date-time" }),
        "google.protobuf.Duration" | "google.protobuf.FieldMask" => json!({ "type": "string" }),
        "google.protobuf.Struct" | "google.protobuf.Any" | "google.protobuf.Empty" => {
            json!({ "type": "object" })
        }
        "google.protobuf.Value" => json!({}),
        "google.protobuf.ListValue" => json!({ "type": "array" }),
        "google.protobuf.StringValue" => json!({ "type": "string" }),
        "google.protobuf.BytesValue" => json!({ "type": "string", "format": "byte" }),
        "google.protobuf.BoolValue" => json!({ "type": "boolean" }),
        "google.protobuf.DoubleValue" | "google.protobuf.FloatValue" => json!({ "type": "number" }),
        "google.protobuf.Int32Value"
        | "google.protobuf.UInt32Value"
        | "google.protobuf.Int64Value"
        | "google.protobuf.UInt64Value" => json!({ "type": "integer" }),
        _ => return None,
    };
    Some(schema)
}
