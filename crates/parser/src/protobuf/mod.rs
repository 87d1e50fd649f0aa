//! Protobuf/gRPC service extraction
//!
//! `.proto` source is handed to a [`ProtoResolver`], which compiles it and
//! yields the package, services and per-method request/response schemas.
//! [`GrpcAdapter`] turns that resolution into catalog operations.
//!
//! The default resolver, [`ProtoxResolver`], compiles the text in memory with
//! `protox` and reflects over the descriptors with `prost-reflect`.
//!
//! ## Example
//! ```rust,ignore
//! use spec_catalog_parser::{GrpcAdapter, ProtoxResolver};
//!
//! let resolver = ProtoxResolver::new();
//! let spec = GrpcAdapter::new(&resolver).parse("greeter.proto", source, "greeter")?;
//! ```

mod adapter;
mod converter;
mod parser;
mod schema;
mod types;

pub use adapter::GrpcAdapter;
pub use parser::ProtoxResolver;
pub use schema::message_schema;
pub use types::{ProtoDocument, ProtoResolution, ProtoResolver, ProtoService, ResolvedRpc};
