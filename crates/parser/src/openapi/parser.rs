//! OpenAPI document loader

use super::types::OpenApiDocument;
use crate::document::parse_document;
use serde_json::Value;
use spec_catalog_common::{CatalogError, ImportConfig, ParsedSpecification, Result};
use tracing::warn;

/// OpenAPI operation extractor
///
/// Holds both the raw document (for local `$ref` lookups) and its typed view.
pub struct OpenApiExtractor {
    /// Raw document root
    root: Value,

    /// Typed view of the root
    document: OpenApiDocument,

    /// Fallback specification name (file name without extension)
    spec_name: String,

    config: ImportConfig,
}

impl OpenApiExtractor {
    /// Load an OpenAPI document from JSON or YAML text
    ///
    /// # Example
    /// ```rust,ignore
    /// let extractor = OpenApiExtractor::from_source(&text, "petstore")?;
    /// let spec = extractor.parse()?;
    /// ```
    pub fn from_source(content: &str, spec_name: &str) -> Result<Self> {
        let root = parse_document(content, "OpenAPI")?;

        if root.get("openapi").is_none() && root.get("asyncapi").is_some() {
            warn!(
                spec = spec_name,
                "document declares `asyncapi` but was routed to the OpenAPI extractor; \
                 pass an explicit ASYNC kind to import its channels"
            );
        }

        let document: OpenApiDocument = serde_json::from_value(root.clone())
            .map_err(|e| CatalogError::Parse(format!("Invalid OpenAPI document: {}", e)))?;

        Ok(Self {
            root,
            document,
            spec_name: spec_name.to_string(),
            config: ImportConfig::default(),
        })
    }

    pub fn with_config(mut self, config: &ImportConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Extract every path/verb pair as an operation
    pub fn parse(&self) -> Result<ParsedSpecification> {
        super::converter::convert_openapi_to_specification(
            &self.root,
            &self.document,
            &self.spec_name,
            &self.config,
        )
    }

    /// Get reference to the typed document
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_openapi() {
        let openapi_json = r#"{
            "openapi": "3.0.0",
            "info": {
                "title": "Test API",
                "version": "1.0.0"
            },
            "paths": {}
        }"#;

        let extractor = OpenApiExtractor::from_source(openapi_json, "test").unwrap();
        assert_eq!(extractor.document().openapi.as_deref(), Some("3.0.0"));

        let spec = extractor.parse().unwrap();
        assert_eq!(spec.name, "Test API");
        assert!(spec.operations.is_empty());
        assert!(spec.errors.is_empty());
    }

    #[test]
    fn test_paths_must_be_object() {
        let result = OpenApiExtractor::from_source(r#"{"openapi": "3.0.0", "paths": []}"#, "bad");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
