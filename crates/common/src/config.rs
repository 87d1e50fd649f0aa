//! Import configuration loading from YAML files
//!
//! Every field is optional in the file; missing values fall back to the
//! defaults below, so an empty document is a valid configuration.

use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default domain prefix used to build the `$id` of resolved schemas
pub const DEFAULT_SCHEMA_ID_PREFIX: &str = "http://spec-catalog.local/schemas/";

/// Default number of leading characters kept as a document preview
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Settings that shape how documents are imported
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Prefix prepended to a schema name to form its `$id`
    pub schema_id_prefix: String,

    /// Characters of the raw document stored under `metadata.preview`
    /// for GraphQL and SOAP documents
    pub preview_chars: usize,

    /// Protocol hint for AsyncAPI documents (e.g., "kafka", "amqp").
    /// When unset, the hint is taken from the document's servers or bindings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub async_protocol: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            schema_id_prefix: DEFAULT_SCHEMA_ID_PREFIX.to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            async_protocol: None,
        }
    }
}

impl ImportConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            CatalogError::Config(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.schema_id_prefix.trim().is_empty() {
            return Err(CatalogError::Config(
                "schema_id_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
