//! OpenAPI 3.x specification extractor
//!
//! Walks `paths` and emits one operation per HTTP verb found in a path item
//! (get/post/put/delete/patch/head/options, case-insensitive).
//!
//! ## Operation identity
//! - id: the document's `operationId`, else `<VERB>_<path with non-alphanumerics as _>`
//! - name: `summary`, else `operationId`, else `"<VERB> <path>"`
//!
//! Request and response schemas are made self-contained with the
//! [`SchemaResolver`](crate::schema::SchemaResolver) against `components`.
//!
//! ## Usage
//! ```rust,ignore
//! use spec_catalog_parser::openapi::OpenApiExtractor;
//!
//! let spec = OpenApiExtractor::from_source(&text, "petstore")?.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use converter::synthesize_operation_id;
pub use parser::OpenApiExtractor;
pub use types::*;
