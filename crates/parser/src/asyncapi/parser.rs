//! AsyncAPI document loader

use crate::document::parse_document;
use serde_json::Value;
use spec_catalog_common::{ImportConfig, ParsedSpecification, Result};

/// AsyncAPI operation extractor
pub struct AsyncApiExtractor {
    root: Value,
    spec_name: String,
    config: ImportConfig,
}

impl AsyncApiExtractor {
    /// Load an AsyncAPI document from JSON or YAML text
    pub fn from_source(content: &str, spec_name: &str) -> Result<Self> {
        Ok(Self {
            root: parse_document(content, "AsyncAPI")?,
            spec_name: spec_name.to_string(),
            config: ImportConfig::default(),
        })
    }

    pub fn with_config(mut self, config: &ImportConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Extract channel operations
    pub fn parse(&self) -> Result<ParsedSpecification> {
        super::converter::convert_asyncapi_to_specification(
            &self.root,
            &self.spec_name,
            &self.config,
        )
    }
}
