//! Unified operation catalog model
//!
//! Every supported interface description format is normalized into a
//! [`ParsedSpecification`] holding a flat list of [`ParsedOperation`]s.
//! Schemas are carried as plain `serde_json::Value`s so callers can persist
//! or forward them without depending on this crate's types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Kind of interface description a document was parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpecificationKind {
    /// OpenAPI (REST over HTTP)
    Http,
    /// AsyncAPI (message channels)
    Async,
    /// GraphQL SDL
    Graphql,
    /// Protocol Buffer service definitions
    Grpc,
    /// WSDL / SOAP
    Soap,
}

impl SpecificationKind {
    /// All kinds, in declaration order
    pub const ALL: [SpecificationKind; 5] = [
        SpecificationKind::Http,
        SpecificationKind::Async,
        SpecificationKind::Graphql,
        SpecificationKind::Grpc,
        SpecificationKind::Soap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificationKind::Http => "HTTP",
            SpecificationKind::Async => "ASYNC",
            SpecificationKind::Graphql => "GRAPHQL",
            SpecificationKind::Grpc => "GRPC",
            SpecificationKind::Soap => "SOAP",
        }
    }
}

impl fmt::Display for SpecificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SpecificationKind {
    type Err = CatalogError;

    /// Accepts kind names and common format aliases, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "openapi" | "rest" => Ok(SpecificationKind::Http),
            "async" | "asyncapi" => Ok(SpecificationKind::Async),
            "graphql" | "gql" => Ok(SpecificationKind::Graphql),
            "grpc" | "proto" | "protobuf" => Ok(SpecificationKind::Grpc),
            "soap" | "wsdl" => Ok(SpecificationKind::Soap),
            _ => Err(CatalogError::UnsupportedKind(s.to_string())),
        }
    }
}

/// Call shape of an RPC method, derived from its two streaming flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RpcCallShape {
    Unary,
    ClientStreaming,
    ServerStreaming,
    Bidirectional,
}

impl RpcCallShape {
    /// Classify a method from its request/response streaming flags
    ///
    /// # Example
    /// ```
    /// use spec_catalog_common::RpcCallShape;
    ///
    /// assert_eq!(RpcCallShape::from_streaming(true, false), RpcCallShape::ClientStreaming);
    /// ```
    pub fn from_streaming(request_stream: bool, response_stream: bool) -> Self {
        match (request_stream, response_stream) {
            (true, true) => RpcCallShape::Bidirectional,
            (true, false) => RpcCallShape::ClientStreaming,
            (false, true) => RpcCallShape::ServerStreaming,
            (false, false) => RpcCallShape::Unary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCallShape::Unary => "unary",
            RpcCallShape::ClientStreaming => "client-streaming",
            RpcCallShape::ServerStreaming => "server-streaming",
            RpcCallShape::Bidirectional => "bidirectional",
        }
    }
}

/// Where a parameter is carried in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Body,
}

impl ParameterLocation {
    /// Map an OpenAPI `in` value onto a location
    ///
    /// Cookies travel in a header; unknown values fall back to `query`.
    pub fn from_openapi(location: &str) -> Self {
        match location.to_ascii_lowercase().as_str() {
            "path" => ParameterLocation::Path,
            "header" | "cookie" => ParameterLocation::Header,
            "body" | "formdata" => ParameterLocation::Body,
            _ => ParameterLocation::Query,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }
}

/// A single input of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedParameter {
    pub name: String,

    /// Declared type (e.g., "string", "integer", "object")
    #[serde(rename = "type")]
    pub param_type: String,

    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "in")]
    pub location: ParameterLocation,
}

/// One possible response of an operation, keyed by status code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    /// Status key, kept as a string so "default" and "2XX" survive
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// One invokable unit within a specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOperation {
    /// Identifier, unique within the owning specification
    pub id: String,

    pub name: String,

    /// HTTP verb, GraphQL keyword, pub/sub direction, RPC method name, or "soap"
    pub method: String,

    /// Route, channel, or RPC path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParsedParameter>,

    #[serde(default)]
    pub responses: Vec<ParsedResponse>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schemas: Option<BTreeMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_stream: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_stream: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_shape: Option<RpcCallShape>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ParsedOperation {
    /// Create an operation with no parameters, responses, or schemas
    pub fn new(id: impl Into<String>, name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            method: method.into(),
            path: None,
            description: None,
            parameters: Vec::new(),
            responses: Vec::new(),
            tags: Vec::new(),
            request_schema: None,
            response_schemas: None,
            request_stream: None,
            response_stream: None,
            call_shape: None,
            metadata: Map::new(),
        }
    }
}

/// One parsed interface description document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSpecification {
    /// Freshly generated identifier, never derived from content
    pub id: String,

    pub name: String,

    pub kind: SpecificationKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub operations: Vec<ParsedOperation>,

    /// Kind-specific metadata (servers, package name, document preview, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Non-empty if and only if the document could not be parsed
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ParsedSpecification {
    /// Create an empty specification with a fresh identifier
    pub fn new(name: impl Into<String>, kind: SpecificationKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            version: None,
            description: None,
            operations: Vec::new(),
            metadata: Map::new(),
            errors: Vec::new(),
        }
    }

    /// Create the placeholder returned in place of a document that failed to parse
    ///
    /// The kind is always HTTP, since the real kind may be what failed.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut spec = Self::new(name, SpecificationKind::Http);
        spec.errors.push(message.into());
        spec
    }

    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Disambiguate duplicate operation ids by appending `_2`, `_3`, ...
    ///
    /// The first occurrence keeps its id. Generated ids never collide with
    /// ids already present in the list.
    pub fn ensure_unique_operation_ids(&mut self) {
        let mut taken: HashSet<String> = HashSet::with_capacity(self.operations.len());
        let originals: HashSet<String> = self.operations.iter().map(|op| op.id.clone()).collect();

        for op in &mut self.operations {
            if taken.insert(op.id.clone()) {
                continue;
            }
            let mut suffix = 2;
            let unique = loop {
                let candidate = format!("{}_{}", op.id, suffix);
                if !taken.contains(&candidate) && !originals.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            };
            taken.insert(unique.clone());
            op.id = unique;
        }
    }
}
