//! Top-level entry point: decode, detect, dispatch, and isolate failures

use crate::asyncapi::AsyncApiExtractor;
use crate::detector::detect_format;
use crate::graphql::GraphQlExtractor;
use crate::openapi::OpenApiExtractor;
use crate::protobuf::{GrpcAdapter, ProtoResolver, ProtoxResolver};
use crate::soap::SoapExtractor;
use crate::source::SpecFile;
use spec_catalog_common::{ImportConfig, ParsedSpecification, Result, SpecificationKind};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// Parses specification files into the unified catalog model
///
/// Neither entry point returns an error: a file that cannot be parsed comes
/// back as an error specification (kind HTTP, no operations, one message in
/// `errors`).
pub struct SpecificationParsingService {
    config: ImportConfig,
    proto_resolver: Box<dyn ProtoResolver>,
}

impl Default for SpecificationParsingService {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl SpecificationParsingService {
    pub fn new(config: ImportConfig) -> Self {
        let proto_resolver = ProtoxResolver::new().with_id_prefix(config.schema_id_prefix.clone());
        Self {
            config,
            proto_resolver: Box::new(proto_resolver),
        }
    }

    /// Replace the proto-parsing collaborator
    pub fn with_proto_resolver(mut self, resolver: impl ProtoResolver + 'static) -> Self {
        self.proto_resolver = Box::new(resolver);
        self
    }

    /// Parse one file, detecting its kind from the file name
    pub fn parse_one(&self, file: &SpecFile) -> ParsedSpecification {
        self.parse_one_as(file, detect_format(file.name()))
    }

    /// Parse one file as an explicit kind, skipping detection
    pub fn parse_one_as(&self, file: &SpecFile, kind: SpecificationKind) -> ParsedSpecification {
        match self.dispatch(file, kind) {
            Ok(mut spec) => {
                spec.ensure_unique_operation_ids();
                debug!(
                    file = file.name(),
                    kind = %spec.kind,
                    operations = spec.operations.len(),
                    "parsed specification"
                );
                spec
            }
            Err(err) => {
                warn!(file = file.name(), kind = %kind, error = %err, "specification failed to parse");
                ParsedSpecification::failed(file.stem(), err.to_string())
            }
        }
    }

    /// Parse files sequentially, one result per file in input order
    ///
    /// A panic inside one extractor is caught and recorded for that file
    /// only; the rest of the batch still runs.
    pub fn parse_many(&self, files: &[SpecFile]) -> Vec<ParsedSpecification> {
        files
            .iter()
            .map(|file| {
                panic::catch_unwind(AssertUnwindSafe(|| self.parse_one(file))).unwrap_or_else(
                    |payload| {
                        let reason = panic_reason(payload.as_ref());
                        error!(file = file.name(), reason = %reason, "extractor panicked");
                        ParsedSpecification::failed(
                            file.stem(),
                            format!("Unexpected failure while parsing {}: {}", file.name(), reason),
                        )
                    },
                )
            })
            .collect()
    }

    fn dispatch(&self, file: &SpecFile, kind: SpecificationKind) -> Result<ParsedSpecification> {
        let content = file.decode()?;
        let name = file.stem();
        debug!(file = file.name(), kind = %kind, bytes = content.len(), "dispatching");

        match kind {
            SpecificationKind::Http => OpenApiExtractor::from_source(&content, &name)?
                .with_config(&self.config)
                .parse(),
            SpecificationKind::Async => AsyncApiExtractor::from_source(&content, &name)?
                .with_config(&self.config)
                .parse(),
            SpecificationKind::Graphql => Ok(GraphQlExtractor::new(&content, &name)
                .with_config(&self.config)
                .parse()),
            SpecificationKind::Grpc => {
                GrpcAdapter::new(self.proto_resolver.as_ref()).parse(file.name(), &content, &name)
            }
            SpecificationKind::Soap => Ok(SoapExtractor::new(&content, &name)?
                .with_config(&self.config)
                .parse()),
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
