//! Integration tests for the OpenAPI extractor

use spec_catalog_parser::{OpenApiExtractor, SpecificationKind};

#[test]
fn test_operation_id_from_document() {
    let doc = r#"{
        "openapi": "3.0.0",
        "info": { "title": "Petstore", "version": "1.0.0" },
        "paths": { "/pets": { "get": { "operationId": "listPets" } } }
    }"#;

    let spec = OpenApiExtractor::from_source(doc, "petstore")
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(spec.kind, SpecificationKind::Http);
    assert_eq!(spec.operations.len(), 1);
    let op = &spec.operations[0];
    assert_eq!(op.id, "listPets");
    assert_eq!(op.method, "GET");
    assert_eq!(op.path.as_deref(), Some("/pets"));
    assert_eq!(op.name, "listPets");
}

#[test]
fn test_synthesized_operation_id() {
    let doc = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets/{id}:
    get:
      responses:
        '200':
          description: A pet
"#;

    let spec = OpenApiExtractor::from_source(doc, "petstore")
        .unwrap()
        .parse()
        .unwrap();

    let op = &spec.operations[0];
    assert_eq!(op.id, "GET__pets__id_");
    assert_eq!(op.name, "GET /pets/{id}");
    assert_eq!(op.responses[0].status, "200");
    assert!(op.responses[0].content_type.is_none());
}

#[test]
fn test_verbs_are_case_insensitive() {
    let doc = r#"{
        "openapi": "3.0.0",
        "paths": {
            "/orders": {
                "GET": { "summary": "List orders" },
                "Post": { "operationId": "createOrder" },
                "parameters": [],
                "x-internal": true
            }
        }
    }"#;

    let spec = OpenApiExtractor::from_source(doc, "orders")
        .unwrap()
        .parse()
        .unwrap();

    let methods: Vec<&str> = spec.operations.iter().map(|op| op.method.as_str()).collect();
    assert_eq!(methods, vec!["GET", "POST"]);
    assert_eq!(spec.operations[0].name, "List orders");
    assert_eq!(spec.name, "orders");
}

#[test]
fn test_parameters_and_schemas() {
    let doc = r##"{
        "openapi": "3.0.0",
        "info": { "title": "Pets", "version": "2.1.0" },
        "servers": [{ "url": "https://pets.example.com" }],
        "paths": {
            "/pets/{petId}": {
                "parameters": [
                    { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
                ],
                "put": {
                    "operationId": "updatePet",
                    "parameters": [
                        { "name": "X-Request-Id", "in": "header" },
                        { "name": "session", "in": "cookie", "description": "Session cookie" },
                        { "name": "dryRun", "in": "query", "schema": { "type": "boolean" } }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Updated",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } },
                                "application/xml": { "schema": { "type": "string" } }
                            }
                        },
                        "default": { "$ref": "#/components/responses/Error" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": { "owner": { "$ref": "#/components/schemas/Owner" } }
                },
                "Owner": { "type": "object", "properties": { "name": { "type": "string" } } },
                "Error": { "type": "object", "properties": { "code": { "type": "integer" } } }
            },
            "responses": {
                "Error": {
                    "description": "Unexpected error",
                    "content": {
                        "application/problem+json": { "schema": { "$ref": "#/components/schemas/Error" } }
                    }
                }
            }
        }
    }"##;

    let spec = OpenApiExtractor::from_source(doc, "pets")
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(spec.version.as_deref(), Some("2.1.0"));
    assert_eq!(spec.metadata["openapi"], "3.0.0");
    assert_eq!(spec.metadata["servers"][0]["url"], "https://pets.example.com");

    let op = &spec.operations[0];
    let params: Vec<(&str, &str, &str)> = op
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.location.as_str(), p.param_type.as_str()))
        .collect();
    assert_eq!(
        params,
        vec![
            ("petId", "path", "string"),
            ("X-Request-Id", "header", "string"),
            ("session", "header", "string"),
            ("dryRun", "query", "boolean"),
            ("body", "body", "object"),
        ]
    );
    assert!(op.parameters[0].required);
    assert!(op.parameters[4].required);

    let request = op.request_schema.as_ref().unwrap();
    assert_eq!(request["properties"]["owner"]["$ref"], "#/definitions/Owner");
    assert!(request["definitions"].get("Owner").is_some());

    assert_eq!(op.responses.len(), 2);
    assert_eq!(op.responses[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(op.responses[1].status, "default");
    assert_eq!(op.responses[1].description.as_deref(), Some("Unexpected error"));
    assert_eq!(
        op.responses[1].content_type.as_deref(),
        Some("application/problem+json")
    );

    let schemas = op.response_schemas.as_ref().unwrap();
    assert_eq!(schemas["default"]["properties"]["code"]["type"], "integer");
    assert_eq!(schemas["200"]["$id"], "http://spec-catalog.local/schemas/Pet");
}

#[test]
fn test_missing_paths_yields_no_operations() {
    let spec = OpenApiExtractor::from_source("openapi: 3.0.0\ninfo:\n  title: Empty\n", "empty")
        .unwrap()
        .parse()
        .unwrap();
    assert!(spec.operations.is_empty());
    assert!(spec.errors.is_empty());
    assert_eq!(spec.name, "Empty");
}

#[test]
fn test_malformed_json_is_an_error() {
    let result = OpenApiExtractor::from_source(r#"{"openapi": "3.0.0", "paths": "#, "broken");
    assert!(result.is_err());
}

#[test]
fn test_numeric_yaml_versions_are_kept_as_text() {
    let doc = r#"
openapi: 3.1
info:
  title: Numbers
  version: 1.0
paths:
  /a:
    get:
      operationId: getA
"#;

    let spec = OpenApiExtractor::from_source(doc, "numbers")
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(spec.version.as_deref(), Some("1.0"));
    assert_eq!(spec.metadata["openapi"], "3.1");
    assert_eq!(spec.operations.len(), 1);
    assert_eq!(spec.operations[0].id, "getA");
}

#[test]
fn test_null_verb_is_skipped() {
    let doc = r#"
openapi: 3.0.0
info:
  title: Sparse
paths:
  /a:
    get:
    post:
      operationId: createA
"#;

    let spec = OpenApiExtractor::from_source(doc, "sparse")
        .unwrap()
        .parse()
        .unwrap();

    assert!(spec.errors.is_empty());
    assert_eq!(spec.operations.len(), 1);
    assert_eq!(spec.operations[0].id, "createA");
    assert_eq!(spec.operations[0].method, "POST");
}
