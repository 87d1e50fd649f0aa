//! Protocol-specific metadata and message schemas for AsyncAPI operations

use super::resolver::SchemaResolver;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Vendor extension naming the classifier of a streaming topic
pub const CLASSIFIER_EXTENSION: &str = "x-maas-classifier-name";

/// Broad transport class a protocol hint falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolFamily {
    /// Partitioned log transports (Kafka)
    StreamingLog,
    /// Broker queues and exchanges (AMQP)
    Queue,
    /// Anything without protocol-specific metadata
    Other,
}

impl ProtocolFamily {
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::to_ascii_lowercase).as_deref() {
            Some("kafka") | Some("kafka-secure") => ProtocolFamily::StreamingLog,
            Some("amqp") | Some("amqps") => ProtocolFamily::Queue,
            _ => ProtocolFamily::Other,
        }
    }
}

/// Connection metadata and payload schemas for one channel operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOperation {
    pub metadata: Map<String, Value>,

    /// Self-contained message schemas keyed by schema name
    pub schemas: BTreeMap<String, Value>,
}

/// Resolves channel operations for a single protocol hint
pub struct ProtocolOperationResolver<'a> {
    schemas: &'a SchemaResolver,
    family: ProtocolFamily,
}

impl<'a> ProtocolOperationResolver<'a> {
    pub fn new(schemas: &'a SchemaResolver, protocol: Option<&str>) -> Self {
        Self {
            schemas,
            family: ProtocolFamily::from_hint(protocol),
        }
    }

    pub fn family(&self) -> ProtocolFamily {
        self.family
    }

    /// Resolve metadata and message schemas for one channel operation
    pub fn resolve(&self, channel_name: &str, channel: &Value, operation: &Value) -> ResolvedOperation {
        ResolvedOperation {
            metadata: self.protocol_metadata(channel_name, channel, operation),
            schemas: self.message_schemas(operation.get("message")),
        }
    }

    fn protocol_metadata(
        &self,
        channel_name: &str,
        channel: &Value,
        operation: &Value,
    ) -> Map<String, Value> {
        let mut metadata = Map::new();

        match self.family {
            ProtocolFamily::StreamingLog => {
                metadata.insert("topic".to_string(), Value::String(channel_name.to_string()));
                let classifier = operation
                    .get(CLASSIFIER_EXTENSION)
                    .or_else(|| channel.get(CLASSIFIER_EXTENSION));
                if let Some(classifier) = classifier {
                    metadata.insert("maasClassifierName".to_string(), classifier.clone());
                }
            }
            ProtocolFamily::Queue => {
                let amqp = channel.pointer("/bindings/amqp");
                let queue = amqp.and_then(|b| b.pointer("/queue/name"));
                let exchange = amqp.and_then(|b| b.pointer("/exchange/name"));
                let username = operation.pointer("/bindings/amqp/userId");

                for (key, value) in [("username", username), ("queue", queue), ("exchange", exchange)] {
                    if let Some(value) = value.filter(|v| !v.is_null()) {
                        metadata.insert(key.to_string(), value.clone());
                    }
                }
            }
            ProtocolFamily::Other => {}
        }

        metadata
    }

    /// Resolve an operation's `message` into self-contained schemas
    ///
    /// Embedded `payload`/`headers` objects take precedence, then a direct
    /// `$ref`, then `oneOf`/`allOf`/`anyOf` lists whose entries are resolved
    /// the same way and merged by schema name.
    pub fn message_schemas(&self, message: Option<&Value>) -> BTreeMap<String, Value> {
        let mut schemas = BTreeMap::new();
        let Some(message) = message.filter(|m| m.is_object()) else {
            return schemas;
        };

        if let Some(inline) = self.inline_schemas(message) {
            return inline;
        }

        if let Some(reference) = message.get("$ref").and_then(Value::as_str) {
            if let Some(resolved) = self.schemas.resolve(reference) {
                schemas.insert(resolved.name, resolved.schema);
            }
            return schemas;
        }

        for keyword in ["oneOf", "allOf", "anyOf"] {
            if let Some(entries) = message.get(keyword).and_then(Value::as_array) {
                for entry in entries {
                    schemas.extend(self.message_schemas(Some(entry)));
                }
            }
        }

        schemas
    }

    fn inline_schemas(&self, message: &Value) -> Option<BTreeMap<String, Value>> {
        let payload = message.get("payload").filter(|p| p.is_object());
        let headers = message.get("headers").filter(|h| h.is_object());
        if payload.is_none() && headers.is_none() {
            return None;
        }

        let name = message
            .get("name")
            .or_else(|| message.get("messageId"))
            .and_then(Value::as_str)
            .unwrap_or("message");
        debug!(message = name, "resolving embedded message schemas");

        let mut schemas = BTreeMap::new();
        if let Some(payload) = payload {
            let resolved = self.schemas.resolve_inline(name, payload);
            schemas.insert(resolved.name, resolved.schema);
        }
        if let Some(headers) = headers {
            let resolved = self.schemas.resolve_inline(&format!("{}Headers", name), headers);
            schemas.insert(resolved.name, resolved.schema);
        }
        Some(schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn components() -> Value {
        json!({
            "messages": {
                "OrderPlaced": { "payload": { "$ref": "#/components/schemas/Order" } },
                "OrderCancelled": { "payload": { "type": "object" } }
            },
            "schemas": {
                "Order": { "type": "object", "properties": { "id": { "type": "string" } } }
            }
        })
    }

    #[test]
    fn test_family_from_hint() {
        assert_eq!(ProtocolFamily::from_hint(Some("Kafka")), ProtocolFamily::StreamingLog);
        assert_eq!(ProtocolFamily::from_hint(Some("amqps")), ProtocolFamily::Queue);
        assert_eq!(ProtocolFamily::from_hint(Some("mqtt")), ProtocolFamily::Other);
        assert_eq!(ProtocolFamily::from_hint(None), ProtocolFamily::Other);
    }

    #[test]
    fn test_streaming_metadata() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, Some("kafka"));
        let channel = json!({ "x-maas-classifier-name": "orders-classifier" });

        let resolved = resolver.resolve("orders", &channel, &json!({}));
        assert_eq!(resolved.metadata["topic"], "orders");
        assert_eq!(resolved.metadata["maasClassifierName"], "orders-classifier");
    }

    #[test]
    fn test_queue_metadata() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, Some("amqp"));
        let channel = json!({
            "bindings": {
                "amqp": {
                    "is": "queue",
                    "queue": { "name": "orders.q" },
                    "exchange": { "name": "orders.x", "type": "topic" }
                }
            }
        });
        let operation = json!({ "bindings": { "amqp": { "userId": "svc-orders" } } });

        let resolved = resolver.resolve("orders", &channel, &operation);
        assert_eq!(resolved.metadata["queue"], "orders.q");
        assert_eq!(resolved.metadata["exchange"], "orders.x");
        assert_eq!(resolved.metadata["username"], "svc-orders");
        assert!(resolved.metadata.get("topic").is_none());
    }

    #[test]
    fn test_queue_metadata_without_bindings() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, Some("amqp"));
        let resolved = resolver.resolve("orders", &json!({}), &json!({}));
        assert!(resolved.metadata.is_empty());
    }

    #[test]
    fn test_message_ref() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, None);
        let message = json!({ "$ref": "#/components/messages/OrderPlaced" });

        let resolved = resolver.message_schemas(Some(&message));
        let schema = &resolved["OrderPlaced"];
        assert_eq!(schema["$ref"], "#/definitions/Order");
        assert!(schema["definitions"].get("Order").is_some());
    }

    #[test]
    fn test_message_one_of() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, None);
        let message = json!({
            "oneOf": [
                { "$ref": "#/components/messages/OrderPlaced" },
                { "$ref": "#/components/messages/OrderCancelled" }
            ]
        });

        let resolved = resolver.message_schemas(Some(&message));
        let names: Vec<&str> = resolved.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["OrderCancelled", "OrderPlaced"]);
    }

    #[test]
    fn test_inline_payload_takes_precedence() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, None);
        let message = json!({
            "name": "OrderShipped",
            "headers": { "type": "object", "properties": { "trace": { "type": "string" } } },
            "payload": {
                "type": "object",
                "properties": { "order": { "$ref": "#/components/schemas/Order" } }
            }
        });

        let resolved = resolver.message_schemas(Some(&message));
        assert_eq!(
            resolved["OrderShipped"]["properties"]["order"]["$ref"],
            "#/definitions/Order"
        );
        assert!(resolved.contains_key("OrderShippedHeaders"));
    }

    #[test]
    fn test_no_message() {
        let schemas = SchemaResolver::new(&components());
        let resolver = ProtocolOperationResolver::new(&schemas, None);
        assert!(resolver.message_schemas(None).is_empty());
    }
}
