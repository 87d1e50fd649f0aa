//! Integration tests for the parsing service entry points

use spec_catalog_parser::{SpecFile, SpecificationKind, SpecificationParsingService};
use std::fs;

const PETSTORE: &str = r#"{
    "openapi": "3.0.0",
    "info": { "title": "Petstore", "version": "1.0.0" },
    "paths": { "/pets": { "get": { "operationId": "listPets" } } }
}"#;

const USERS: &str = r#"
openapi: 3.0.0
info:
  title: Users
  version: 1.0.0
paths:
  /users:
    get:
      operationId: listUsers
    post:
      operationId: listUsers
"#;

#[test]
fn test_batch_isolates_malformed_file() {
    let files = vec![
        SpecFile::new("petstore.json", PETSTORE),
        SpecFile::new("broken.json", r#"{"openapi": "3.0.0", "paths": {"#),
        SpecFile::new("users.yaml", USERS),
    ];

    let results = SpecificationParsingService::default().parse_many(&files);
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].name, "Petstore");
    assert!(results[0].errors.is_empty());
    assert_eq!(results[0].operations[0].id, "listPets");

    assert_eq!(results[1].name, "broken");
    assert_eq!(results[1].kind, SpecificationKind::Http);
    assert!(results[1].operations.is_empty());
    assert!(!results[1].errors.is_empty());

    assert_eq!(results[2].name, "Users");
    assert_eq!(results[2].operations.len(), 2);
}

#[test]
fn test_duplicate_operation_ids_are_disambiguated() {
    let spec = SpecificationParsingService::default().parse_one(&SpecFile::new("users.yaml", USERS));
    let ids: Vec<&str> = spec.operations.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["listUsers", "listUsers_2"]);
}

#[test]
fn test_proto_without_services() {
    let source = "syntax = \"proto3\";\npackage empty.v1;\nmessage Ping { string id = 1; }\n";
    let spec = SpecificationParsingService::default().parse_one(&SpecFile::new("ping.proto", source));

    assert_eq!(spec.name, "ping");
    assert!(spec.operations.is_empty());
    assert_eq!(spec.errors.len(), 1);
    assert!(spec.errors[0].contains("No RPC methods found"));
}

#[test]
fn test_wsdl_without_port_type() {
    let wsdl = r#"<?xml version="1.0"?><definitions name="Empty"><types/></definitions>"#;
    let spec = SpecificationParsingService::default().parse_one(&SpecFile::new("empty.wsdl", wsdl));

    assert_eq!(spec.kind, SpecificationKind::Soap);
    assert!(spec.operations.is_empty());
    assert!(spec.errors.is_empty());
}

#[test]
fn test_graphql_dispatch() {
    let sdl = "query Me {\n  me { id }\n}\nmutation Logout {\n  logout\n}\n";
    let spec = SpecificationParsingService::default().parse_one(&SpecFile::new("auth.gql", sdl));

    assert_eq!(spec.kind, SpecificationKind::Graphql);
    assert_eq!(spec.name, "auth");
    assert_eq!(spec.operations.len(), 2);
    assert_eq!(spec.metadata["preview"], sdl);
}

#[test]
fn test_asyncapi_yaml_is_routed_to_http_by_default() {
    let doc = "asyncapi: 2.6.0\ninfo:\n  title: Events\nchannels:\n  orders:\n    publish: {}\n";
    let service = SpecificationParsingService::default();
    let file = SpecFile::new("events.yaml", doc);

    let detected = service.parse_one(&file);
    assert_eq!(detected.kind, SpecificationKind::Http);
    assert!(detected.operations.is_empty());

    let explicit = service.parse_one_as(&file, SpecificationKind::Async);
    assert_eq!(explicit.kind, SpecificationKind::Async);
    assert_eq!(explicit.operations[0].id, "publish_orders");
}

#[test]
fn test_parse_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petstore.json");
    fs::write(&path, format!("\u{feff}{}", PETSTORE)).unwrap();

    let file = SpecFile::from_path(&path).unwrap();
    assert_eq!(file.name(), "petstore.json");

    let spec = SpecificationParsingService::default().parse_one(&file);
    assert!(spec.errors.is_empty());
    assert_eq!(spec.operations.len(), 1);
}
