//! Converts an AsyncAPI document into a ParsedSpecification

use super::CHANNEL_ACTIONS;
use crate::document::str_field;
use crate::schema::{ProtocolOperationResolver, SchemaResolver};
use serde_json::{Map, Value};
use spec_catalog_common::{
    ImportConfig, ParameterLocation, ParsedOperation, ParsedParameter, ParsedSpecification,
    Result, SpecificationKind,
};
use tracing::debug;

/// Convert an AsyncAPI document to a ParsedSpecification
pub fn convert_asyncapi_to_specification(
    root: &Value,
    spec_name: &str,
    config: &ImportConfig,
) -> Result<ParsedSpecification> {
    let empty = Value::Object(Map::new());
    let components = root.get("components").unwrap_or(&empty);
    let schemas = SchemaResolver::new(components).with_id_prefix(&config.schema_id_prefix);

    let protocol = config
        .async_protocol
        .clone()
        .or_else(|| protocol_hint(root));
    let resolver = ProtocolOperationResolver::new(&schemas, protocol.as_deref());
    debug!(
        spec = spec_name,
        protocol = protocol.as_deref().unwrap_or("none"),
        family = ?resolver.family(),
        "resolving AsyncAPI channels"
    );

    let info = root.get("info");
    let title = info
        .and_then(|i| str_field(i, "title"))
        .unwrap_or_else(|| spec_name.to_string());

    let mut spec = ParsedSpecification::new(title, SpecificationKind::Async);
    spec.version = info.and_then(|i| str_field(i, "version"));
    spec.description = info.and_then(|i| str_field(i, "description"));

    for key in ["asyncapi", "info", "servers", "defaultContentType"] {
        if let Some(value) = root.get(key) {
            spec.metadata.insert(key.to_string(), value.clone());
        }
    }
    if let Some(protocol) = &protocol {
        spec.metadata
            .insert("protocol".to_string(), Value::String(protocol.clone()));
    }

    let Some(channels) = root.get("channels").and_then(Value::as_object) else {
        return Ok(spec);
    };

    for (channel_name, channel) in channels {
        let parameters = channel_parameters(channel);

        for action in CHANNEL_ACTIONS {
            let Some(operation) = channel.get(*action).filter(|op| op.is_object()) else {
                continue;
            };

            let name = str_field(operation, "summary")
                .or_else(|| str_field(operation, "operationId"))
                .unwrap_or_else(|| format!("{} {}", action, channel_name));

            let mut op = ParsedOperation::new(format!("{}_{}", action, channel_name), name, *action);
            op.path = Some(channel_name.clone());
            op.description = str_field(operation, "description")
                .or_else(|| str_field(channel, "description"));
            op.tags = vec!["asyncapi".to_string(), action.to_string()];
            op.parameters = parameters.clone();

            let resolved = resolver.resolve(channel_name, channel, operation);
            op.metadata = resolved.metadata;
            if let Some(operation_id) = operation.get("operationId") {
                op.metadata
                    .insert("operationId".to_string(), operation_id.clone());
            }
            op.response_schemas = Some(resolved.schemas);

            spec.operations.push(op);
        }
    }

    debug!(
        spec = %spec.name,
        operations = spec.operations.len(),
        "extracted AsyncAPI operations"
    );

    Ok(spec)
}

/// Protocol named by the first server, else the first channel binding key
pub fn protocol_hint(root: &Value) -> Option<String> {
    let from_servers = root
        .get("servers")
        .and_then(Value::as_object)
        .and_then(|servers| servers.values().find_map(|s| str_field(s, "protocol")));

    from_servers.or_else(|| {
        root.get("channels")
            .and_then(Value::as_object)?
            .values()
            .filter_map(|channel| channel.get("bindings").and_then(Value::as_object))
            .find_map(|bindings| bindings.keys().next().cloned())
    })
}

/// Channel parameters (`{userId}` in `user/{userId}/signedup`) as path parameters
fn channel_parameters(channel: &Value) -> Vec<ParsedParameter> {
    let Some(parameters) = channel.get("parameters").and_then(Value::as_object) else {
        return Vec::new();
    };

    parameters
        .iter()
        .map(|(name, param)| ParsedParameter {
            name: name.clone(),
            param_type: param
                .pointer("/schema/type")
                .and_then(Value::as_str)
                .unwrap_or("string")
                .to_string(),
            required: true,
            description: str_field(param, "description"),
            location: ParameterLocation::Path,
        })
        .collect()
}
