//! Converts an OpenAPI document into a ParsedSpecification

use super::types::{
    deref, first_media_type, OpenApiDocument, Operation, Parameter, RequestBody, Response,
    HTTP_METHODS,
};
use crate::document::str_field;
use crate::schema::{self_contained, SchemaResolver};
use serde_json::{Map, Value};
use spec_catalog_common::{
    CatalogError, ImportConfig, ParameterLocation, ParsedOperation, ParsedParameter,
    ParsedResponse, ParsedSpecification, Result, SpecificationKind,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Convert an OpenAPI document to a ParsedSpecification
pub fn convert_openapi_to_specification(
    root: &Value,
    document: &OpenApiDocument,
    spec_name: &str,
    config: &ImportConfig,
) -> Result<ParsedSpecification> {
    let components = document
        .components
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()));
    let resolver = SchemaResolver::new(&components).with_id_prefix(&config.schema_id_prefix);

    let info = document.info.as_ref();
    let title = info
        .and_then(|i| str_field(i, "title"))
        .unwrap_or_else(|| spec_name.to_string());

    let mut spec = ParsedSpecification::new(title, SpecificationKind::Http);
    spec.version = info.and_then(|i| str_field(i, "version"));
    spec.description = info.and_then(|i| str_field(i, "description"));

    if let Some(version) = &document.openapi {
        spec.metadata
            .insert("openapi".to_string(), Value::String(version.clone()));
    }
    if let Some(info) = &document.info {
        spec.metadata.insert("info".to_string(), info.clone());
    }
    if let Some(servers) = &document.servers {
        spec.metadata.insert("servers".to_string(), servers.clone());
    }

    for (path, item) in &document.paths {
        let item = deref(item, root);
        let Some(item_obj) = item.as_object() else {
            continue;
        };
        let shared_params = item
            .get("parameters")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (key, value) in item_obj {
            let verb = key.to_ascii_lowercase();
            if !HTTP_METHODS.contains(&verb.as_str()) || !value.is_object() {
                continue;
            }

            let operation: Operation = serde_json::from_value(value.clone()).map_err(|e| {
                CatalogError::Parse(format!(
                    "Invalid {} operation at {}: {}",
                    verb.to_ascii_uppercase(),
                    path,
                    e
                ))
            })?;

            spec.operations.push(convert_operation(
                root,
                &resolver,
                path,
                &verb,
                &operation,
                shared_params,
            )?);
        }
    }

    debug!(
        spec = %spec.name,
        operations = spec.operations.len(),
        "extracted OpenAPI operations"
    );

    Ok(spec)
}

fn convert_operation(
    root: &Value,
    resolver: &SchemaResolver,
    path: &str,
    verb: &str,
    operation: &Operation,
    shared_params: &[Value],
) -> Result<ParsedOperation> {
    let method = verb.to_ascii_uppercase();
    let id = operation
        .operation_id
        .clone()
        .unwrap_or_else(|| synthesize_operation_id(&method, path));
    let name = operation
        .summary
        .clone()
        .or_else(|| operation.operation_id.clone())
        .unwrap_or_else(|| format!("{} {}", method, path));

    let mut op = ParsedOperation::new(id, name, method);
    op.path = Some(path.to_string());
    op.description = operation.description.clone();
    op.tags = operation.tags.clone();
    op.parameters = convert_parameters(root, shared_params, &operation.parameters)?;

    if let Some(body) = &operation.request_body {
        let body: RequestBody = serde_json::from_value(deref(body, root).clone())
            .map_err(|e| CatalogError::Parse(format!("Invalid requestBody in {}: {}", op.id, e)))?;

        let schema = first_media_type(&body.content)
            .and_then(|(_, schema)| schema)
            .map(|schema| self_contained(resolver, &format!("{}Request", op.id), schema));
        let body_type = schema
            .as_ref()
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("object")
            .to_string();

        op.parameters.push(ParsedParameter {
            name: "body".to_string(),
            param_type: body_type,
            required: body.required,
            description: body.description.clone(),
            location: ParameterLocation::Body,
        });
        op.request_schema = schema;
    }

    let mut response_schemas = BTreeMap::new();
    for (status, value) in &operation.responses {
        let response: Response = serde_json::from_value(deref(value, root).clone()).map_err(|e| {
            CatalogError::Parse(format!("Invalid response {} in {}: {}", status, op.id, e))
        })?;

        let media = first_media_type(&response.content);
        let schema = media.and_then(|(_, schema)| schema).map(|schema| {
            self_contained(resolver, &format!("{}Response{}", op.id, status), schema)
        });
        if let Some(schema) = &schema {
            response_schemas.insert(status.clone(), schema.clone());
        }

        op.responses.push(ParsedResponse {
            status: status.clone(),
            description: response.description.clone(),
            content_type: media.map(|(media_type, _)| media_type.to_string()),
            schema,
        });
    }
    if !response_schemas.is_empty() {
        op.response_schemas = Some(response_schemas);
    }

    Ok(op)
}

/// Merge path-level and operation-level parameters
///
/// An operation parameter replaces a path parameter with the same name and location.
fn convert_parameters(
    root: &Value,
    shared: &[Value],
    own: &[Value],
) -> Result<Vec<ParsedParameter>> {
    let mut parameters: Vec<ParsedParameter> = Vec::new();

    for raw in shared.iter().chain(own) {
        let param: Parameter = serde_json::from_value(deref(raw, root).clone())
            .map_err(|e| CatalogError::Parse(format!("Invalid parameter: {}", e)))?;
        if param.name.is_empty() {
            continue;
        }

        let parsed = ParsedParameter {
            param_type: param.declared_type(),
            name: param.name,
            required: param.required,
            description: param.description,
            location: ParameterLocation::from_openapi(&param.location),
        };

        match parameters
            .iter_mut()
            .find(|p| p.name == parsed.name && p.location == parsed.location)
        {
            Some(existing) => *existing = parsed,
            None => parameters.push(parsed),
        }
    }

    Ok(parameters)
}

/// Build an id from the verb and the path with non-alphanumerics replaced
///
/// `GET /pets/{id}` becomes `GET__pets__id_`.
pub fn synthesize_operation_id(method: &str, path: &str) -> String {
    let sanitized: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", method, sanitized)
}
