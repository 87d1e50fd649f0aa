//! Interface-description parsing into a unified operation catalog
//!
//! This crate turns OpenAPI, AsyncAPI, GraphQL SDL, Protocol Buffer and
//! WSDL documents into [`ParsedSpecification`] values whose operations carry
//! self-contained request/response schemas.
//!
//! ## Pipeline
//!
//! 1. [`SpecFile::decode`] turns raw bytes into text
//! 2. [`detect_format`] picks a [`SpecificationKind`] from the file extension
//! 3. One extractor walks the document:
//!    - `.json` / `.yaml` / `.yml` (and anything unknown) → [`OpenApiExtractor`]
//!    - explicit ASYNC kind → [`AsyncApiExtractor`]
//!    - `.graphql` / `.gql` → [`GraphQlExtractor`]
//!    - `.proto` → [`GrpcAdapter`]
//!    - `.wsdl` / `.xsd` → [`SoapExtractor`]
//! 4. [`SpecificationParsingService`] converts any failure into an error
//!    specification so batches never abort
//!
//! ## Example
//! ```rust,ignore
//! use spec_catalog_parser::{SpecFile, SpecificationParsingService};
//!
//! let service = SpecificationParsingService::default();
//! let spec = service.parse_one(&SpecFile::from_path("petstore.yaml")?);
//! for op in &spec.operations {
//!     println!("{} {}", op.method, op.id);
//! }
//! ```

pub mod asyncapi;
mod detector;
mod document;
mod graphql;
pub mod openapi;
pub mod protobuf;
pub mod schema;
mod service;
mod soap;
mod source;

pub use asyncapi::AsyncApiExtractor;
pub use detector::{detect_format, KNOWN_EXTENSIONS};
pub use document::parse_document;
pub use graphql::GraphQlExtractor;
pub use openapi::OpenApiExtractor;
pub use protobuf::{GrpcAdapter, ProtoResolver, ProtoxResolver};
pub use schema::{ProtocolOperationResolver, SchemaResolver};
pub use service::SpecificationParsingService;
pub use soap::SoapExtractor;
pub use source::SpecFile;

pub use spec_catalog_common::{
    CatalogError, ImportConfig, ParsedOperation, ParsedSpecification, Result, SpecificationKind,
};
