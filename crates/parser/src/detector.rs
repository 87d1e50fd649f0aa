//! Specification kind detection from file names
//!
//! Detection is extension-only. JSON and YAML files are always routed to the
//! OpenAPI extractor, even when they carry an AsyncAPI document; callers that
//! know better pass an explicit kind instead.

use crate::source::file_extension;
use spec_catalog_common::SpecificationKind;

/// Detect specification kind from a file name's extension
///
/// Never fails: unknown and ambiguous extensions map to HTTP.
pub fn detect_format(file_name: &str) -> SpecificationKind {
    match file_extension(file_name).as_deref() {
        Some("wsdl") | Some("xsd") => SpecificationKind::Soap,
        Some("proto") => SpecificationKind::Grpc,
        Some("graphql") | Some("gql") => SpecificationKind::Graphql,
        Some("yaml") | Some("yml") | Some("json") => SpecificationKind::Http,
        _ => SpecificationKind::Http,
    }
}

/// Extensions the detector maps to a dedicated kind or to HTTP by convention
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "json", "yaml", "yml", "proto", "graphql", "gql", "wsdl", "xsd",
];
