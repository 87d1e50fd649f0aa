//! Converts a proto resolution into the unified operation catalog

use super::types::{ProtoResolution, ResolvedRpc};
use serde_json::Value;
use spec_catalog_common::{
    CatalogError, ParsedOperation, ParsedResponse, ParsedSpecification, Result, RpcCallShape,
    SpecificationKind,
};
use std::collections::BTreeMap;

/// Build a specification from a collaborator resolution
///
/// Zero resolved methods is a structural failure for proto files.
pub fn convert_proto_to_specification(
    resolution: ProtoResolution,
    file_name: &str,
    spec_name: &str,
) -> Result<ParsedSpecification> {
    if resolution.operations.is_empty() {
        return Err(CatalogError::NoOperations(format!(
            "No RPC methods found in {}",
            file_name
        )));
    }

    let mut spec = ParsedSpecification::new(spec_name, SpecificationKind::Grpc);
    let document = &resolution.document;
    spec.metadata.insert(
        "packageName".to_string(),
        Value::String(document.package.clone()),
    );
    if let Some(alias) = &document.language_package {
        spec.metadata
            .insert("languagePackage".to_string(), Value::String(alias.clone()));
    }
    spec.metadata.insert(
        "services".to_string(),
        serde_json::to_value(&document.services)?,
    );

    spec.operations = resolution
        .operations
        .iter()
        .map(|rpc| convert_rpc(rpc, &document.package))
        .collect();

    Ok(spec)
}

fn convert_rpc(rpc: &ResolvedRpc, package: &str) -> ParsedOperation {
    let mut op = ParsedOperation::new(
        format!("rpc_{}", rpc.operation_id),
        rpc.method_name.clone(),
        rpc.method_name.clone(),
    );
    op.path = Some(rpc.path.clone());
    op.description = rpc.summary.clone();
    op.responses = vec![ParsedResponse {
        status: "200".to_string(),
        description: None,
        content_type: Some("application/json".to_string()),
        schema: Some(rpc.response_schema.clone()),
    }];
    op.tags = vec!["grpc".to_string(), rpc.service_name.to_lowercase()];
    op.request_schema = Some(rpc.request_schema.clone());
    op.response_schemas = Some(BTreeMap::from([(
        "200".to_string(),
        rpc.response_schema.clone(),
    )]));
    op.request_stream = Some(rpc.request_stream);
    op.response_stream = Some(rpc.response_stream);
    op.call_shape = Some(RpcCallShape::from_streaming(
        rpc.request_stream,
        rpc.response_stream,
    ));

    for (key, value) in [
        ("serviceName", rpc.service_name.as_str()),
        ("packageName", package),
        ("requestType", rpc.request_type.as_str()),
        ("responseType", rpc.response_type.as_str()),
    ] {
        op.metadata
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    op
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protobuf::types::{ProtoDocument, ProtoService};
    use serde_json::json;

    fn rpc(method: &str, request_stream: bool, response_stream: bool) -> ResolvedRpc {
        ResolvedRpc {
            operation_id: format!("Greeter_{}", method),
            service_name: "Greeter".to_string(),
            method_name: method.to_string(),
            path: format!("/hello.Greeter/{}", method),
            summary: None,
            request_type: "hello.HelloRequest".to_string(),
            response_type: "hello.HelloReply".to_string(),
            request_stream,
            response_stream,
            request_schema: json!({ "type": "object", "title": "HelloRequest" }),
            response_schema: json!({ "type": "object", "title": "HelloReply" }),
        }
    }

    #[test]
    fn test_empty_resolution_fails() {
        let err = convert_proto_to_specification(ProtoResolution::default(), "empty.proto", "empty")
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoOperations(_)));
        assert_eq!(err.to_string(), "No RPC methods found in empty.proto");
    }

    #[test]
    fn test_convert_rpc() {
        let resolution = ProtoResolution {
            document: ProtoDocument {
                package: "hello".to_string(),
                language_package: None,
                services: vec![ProtoService {
                    name: "hello.Greeter".to_string(),
                    methods: vec!["SayHello".to_string()],
                }],
            },
            operations: vec![rpc("SayHello", false, true)],
        };

        let spec = convert_proto_to_specification(resolution, "hello.proto", "hello").unwrap();
        assert_eq!(spec.kind, SpecificationKind::Grpc);
        assert_eq!(spec.metadata["packageName"], "hello");
        assert_eq!(spec.metadata["services"][0]["name"], "hello.Greeter");

        let op = &spec.operations[0];
        assert_eq!(op.id, "rpc_Greeter_SayHello");
        assert_eq!(op.method, "SayHello");
        assert!(op.parameters.is_empty());
        assert_eq!(op.tags, vec!["grpc", "greeter"]);
        assert_eq!(op.call_shape, Some(RpcCallShape::ServerStreaming));
        assert_eq!(op.responses[0].status, "200");
        assert_eq!(op.responses[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            op.response_schemas.as_ref().unwrap()["200"]["title"],
            "HelloReply"
        );
        assert_eq!(op.request_schema.as_ref().unwrap()["title"], "HelloRequest");
        assert_eq!(op.metadata["requestType"], "hello.HelloRequest");
        assert_eq!(op.metadata["packageName"], "hello");
    }
}
