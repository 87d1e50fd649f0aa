//! gRPC adapter over a proto-parsing collaborator

use super::converter::convert_proto_to_specification;
use super::types::ProtoResolver;
use spec_catalog_common::{ParsedSpecification, Result};
use tracing::debug;

/// Turns `.proto` text into a specification via a [`ProtoResolver`]
pub struct GrpcAdapter<'a> {
    resolver: &'a dyn ProtoResolver,
}

impl<'a> GrpcAdapter<'a> {
    pub fn new(resolver: &'a dyn ProtoResolver) -> Self {
        Self { resolver }
    }

    /// Resolve the file and convert its RPC methods
    ///
    /// Fails when the collaborator fails or resolves no methods.
    pub fn parse(&self, file_name: &str, source: &str, spec_name: &str) -> Result<ParsedSpecification> {
        let resolution = self.resolver.resolve(file_name, source)?;
        debug!(
            file = file_name,
            package = %resolution.document.package,
            methods = resolution.operations.len(),
            "resolved proto document"
        );
        convert_proto_to_specification(resolution, file_name, spec_name)
    }
}
