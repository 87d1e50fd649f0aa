//! Output of the proto-parsing collaborator

use serde::Serialize;
use serde_json::Value;
use spec_catalog_common::Result;

/// Parses `.proto` text into a document summary and its resolved RPC methods
///
/// The gRPC adapter only consumes this output; any implementation that can
/// turn proto source into these shapes can be plugged into the service.
pub trait ProtoResolver: Send + Sync {
    fn resolve(&self, file_name: &str, source: &str) -> Result<ProtoResolution>;
}

/// Everything the collaborator yields for one `.proto` file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProtoResolution {
    pub document: ProtoDocument,
    pub operations: Vec<ResolvedRpc>,
}

/// Structured view of a proto file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoDocument {
    /// Proto package (e.g., "helloworld.v1"), empty when undeclared
    pub package: String,

    /// Language-specific package alias (java_package, go_package, csharp_namespace)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_package: Option<String>,

    pub services: Vec<ProtoService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProtoService {
    /// Fully qualified service name
    pub name: String,
    pub methods: Vec<String>,
}

/// One RPC method with its request and response schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRpc {
    pub operation_id: String,
    pub service_name: String,
    pub method_name: String,
    pub path: String,
    pub summary: Option<String>,
    pub request_type: String,
    pub response_type: String,
    pub request_stream: bool,
    pub response_stream: bool,
    pub request_schema: Value,
    pub response_schema: Value,
}
