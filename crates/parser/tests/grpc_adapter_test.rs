//! Integration tests for the gRPC adapter

use mockall::mock;
use serde_json::json;
use spec_catalog_common::RpcCallShape;
use spec_catalog_parser::protobuf::{
    GrpcAdapter, ProtoDocument, ProtoResolution, ProtoResolver, ProtoService, ProtoxResolver,
    ResolvedRpc,
};
use spec_catalog_parser::{CatalogError, Result};

mock! {
    pub Resolver {}

    impl ProtoResolver for Resolver {
        fn resolve(&self, file_name: &str, source: &str) -> Result<ProtoResolution>;
    }
}

fn rpc(method: &str, request_stream: bool, response_stream: bool) -> ResolvedRpc {
    ResolvedRpc {
        operation_id: format!("RouteGuide_{}", method),
        service_name: "RouteGuide".to_string(),
        method_name: method.to_string(),
        path: format!("/routeguide.RouteGuide/{}", method),
        summary: Some(format!("{} call", method)),
        request_type: "routeguide.Point".to_string(),
        response_type: "routeguide.Feature".to_string(),
        request_stream,
        response_stream,
        request_schema: json!({ "type": "object", "title": "Point" }),
        response_schema: json!({ "type": "object", "title": "Feature" }),
    }
}

fn route_guide() -> ProtoResolution {
    ProtoResolution {
        document: ProtoDocument {
            package: "routeguide".to_string(),
            language_package: Some("io.grpc.examples.routeguide".to_string()),
            services: vec![ProtoService {
                name: "routeguide.RouteGuide".to_string(),
                methods: vec![
                    "GetFeature".to_string(),
                    "RecordRoute".to_string(),
                    "ListFeatures".to_string(),
                    "RouteChat".to_string(),
                ],
            }],
        },
        operations: vec![
            rpc("GetFeature", false, false),
            rpc("RecordRoute", true, false),
            rpc("ListFeatures", false, true),
            rpc("RouteChat", true, true),
        ],
    }
}

#[test]
fn test_call_shapes_follow_streaming_flags() {
    let mut resolver = MockResolver::new();
    resolver
        .expect_resolve()
        .withf(|name, _| name == "route_guide.proto")
        .times(1)
        .returning(|_, _| Ok(route_guide()));

    let spec = GrpcAdapter::new(&resolver)
        .parse("route_guide.proto", "syntax = \"proto3\";", "route_guide")
        .unwrap();

    let shapes: Vec<(&str, Option<RpcCallShape>)> = spec
        .operations
        .iter()
        .map(|op| (op.id.as_str(), op.call_shape))
        .collect();
    assert_eq!(
        shapes,
        vec![
            ("rpc_RouteGuide_GetFeature", Some(RpcCallShape::Unary)),
            ("rpc_RouteGuide_RecordRoute", Some(RpcCallShape::ClientStreaming)),
            ("rpc_RouteGuide_ListFeatures", Some(RpcCallShape::ServerStreaming)),
            ("rpc_RouteGuide_RouteChat", Some(RpcCallShape::Bidirectional)),
        ]
    );
}

#[test]
fn test_operation_shape() {
    let mut resolver = MockResolver::new();
    resolver
        .expect_resolve()
        .returning(|_, _| Ok(route_guide()));

    let spec = GrpcAdapter::new(&resolver)
        .parse("route_guide.proto", "", "route_guide")
        .unwrap();

    assert_eq!(spec.metadata["packageName"], "routeguide");
    assert_eq!(spec.metadata["languagePackage"], "io.grpc.examples.routeguide");

    let op = &spec.operations[0];
    assert_eq!(op.method, "GetFeature");
    assert_eq!(op.path.as_deref(), Some("/routeguide.RouteGuide/GetFeature"));
    assert_eq!(op.description.as_deref(), Some("GetFeature call"));
    assert!(op.parameters.is_empty());
    assert_eq!(op.tags, vec!["grpc", "routeguide"]);
    assert_eq!(op.request_stream, Some(false));
    assert_eq!(op.response_stream, Some(false));
    assert_eq!(op.responses.len(), 1);
    assert_eq!(op.responses[0].schema.as_ref().unwrap()["title"], "Feature");
    assert_eq!(op.metadata["serviceName"], "RouteGuide");
    assert_eq!(op.metadata["responseType"], "routeguide.Feature");
}

#[test]
fn test_no_methods_is_an_error() {
    let mut resolver = MockResolver::new();
    resolver
        .expect_resolve()
        .returning(|_, _| Ok(ProtoResolution::default()));

    let err = GrpcAdapter::new(&resolver)
        .parse("types.proto", "", "types")
        .unwrap_err();
    assert!(err.to_string().contains("No RPC methods found"));
}

#[test]
fn test_collaborator_failure_propagates() {
    let mut resolver = MockResolver::new();
    resolver
        .expect_resolve()
        .returning(|_, _| Err(CatalogError::Collaborator("unexpected token".to_string())));

    let err = GrpcAdapter::new(&resolver)
        .parse("broken.proto", "service {", "broken")
        .unwrap_err();
    assert!(matches!(err, CatalogError::Collaborator(_)));
}

#[test]
fn test_compiled_proto_end_to_end() {
    let source = r#"
syntax = "proto3";
package inventory.v1;

service Inventory {
  rpc Reserve (ReserveRequest) returns (ReserveReply);
  rpc Watch (WatchRequest) returns (stream StockLevel);
}

message ReserveRequest { string sku = 1; int32 quantity = 2; }
message ReserveReply { bool accepted = 1; }
message WatchRequest { repeated string skus = 1; }
message StockLevel { string sku = 1; int64 available = 2; }
"#;

    let resolver = ProtoxResolver::new();
    let spec = GrpcAdapter::new(&resolver)
        .parse("inventory.proto", source, "inventory")
        .unwrap();

    let ids: Vec<&str> = spec.operations.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["rpc_Inventory_Reserve", "rpc_Inventory_Watch"]);
    assert_eq!(spec.operations[1].call_shape, Some(RpcCallShape::ServerStreaming));

    let request = spec.operations[0].request_schema.as_ref().unwrap();
    assert_eq!(request["properties"]["quantity"]["type"], "integer");
    assert_eq!(request["$id"], "http://spec-catalog.local/schemas/inventory.v1.ReserveRequest");
}
