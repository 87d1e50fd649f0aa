//! Common types and utilities for Spec Catalog
//!
//! This crate contains the unified operation catalog model, the error type,
//! and the import configuration shared by the parser, report, and CLI crates.

mod config;
mod model;

pub use config::{ImportConfig, DEFAULT_PREVIEW_CHARS, DEFAULT_SCHEMA_ID_PREFIX};
pub use model::{
    ParameterLocation, ParsedOperation, ParsedParameter, ParsedResponse, ParsedSpecification,
    RpcCallShape, SpecificationKind,
};

use thiserror::Error;

/// Errors that can occur while importing a specification
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported specification kind: {0}")]
    UnsupportedKind(String),

    #[error("{0}")]
    NoOperations(String),

    #[error("Proto parser error: {0}")]
    Collaborator(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_operations_message_is_verbatim() {
        let err = CatalogError::NoOperations("No RPC methods found in greeter.proto".to_string());
        assert_eq!(err.to_string(), "No RPC methods found in greeter.proto");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
