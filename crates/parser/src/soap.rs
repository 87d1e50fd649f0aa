//! WSDL / SOAP operation scanner
//!
//! Operations are taken from the first `portType` block. A document without
//! a `portType` yields zero operations and is not an error.

use crate::document::preview;
use regex::Regex;
use serde_json::Value;
use spec_catalog_common::{
    CatalogError, ImportConfig, ParsedOperation, ParsedSpecification, Result, SpecificationKind,
};
use tracing::debug;

// Attribute values may be single- or double-quoted
const PORT_TYPE_PATTERN: &str = r#"(?s)<(?:[\w-]+:)?portType\b[^>]*?\bname\s*=\s*["']([^"']+)["'][^>]*>(.*?)</(?:[\w-]+:)?portType>"#;
const OPERATION_PATTERN: &str = r#"<(?:[\w-]+:)?operation\b[^>]*?\bname\s*=\s*["']([^"']+)["']"#;
const SERVICE_PATTERN: &str = r#"<(?:[\w-]+:)?service\b[^>]*?\bname\s*=\s*["']([^"']+)["']"#;
const TARGET_NAMESPACE_PATTERN: &str = r#"\btargetNamespace\s*=\s*["']([^"']+)["']"#;

/// SOAP operation extractor
pub struct SoapExtractor<'a> {
    content: &'a str,
    spec_name: String,
    config: ImportConfig,
    port_type: Regex,
    operation: Regex,
    service: Regex,
    target_namespace: Regex,
}

impl<'a> SoapExtractor<'a> {
    pub fn new(content: &'a str, spec_name: &str) -> Result<Self> {
        Ok(Self {
            content,
            spec_name: spec_name.to_string(),
            config: ImportConfig::default(),
            port_type: compile(PORT_TYPE_PATTERN)?,
            operation: compile(OPERATION_PATTERN)?,
            service: compile(SERVICE_PATTERN)?,
            target_namespace: compile(TARGET_NAMESPACE_PATTERN)?,
        })
    }

    pub fn with_config(mut self, config: &ImportConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Extract the operations of the first `portType`
    pub fn parse(&self) -> ParsedSpecification {
        let mut spec = ParsedSpecification::new(self.spec_name.clone(), SpecificationKind::Soap);
        spec.metadata.insert(
            "preview".to_string(),
            Value::String(preview(self.content, self.config.preview_chars)),
        );
        if let Some(namespace) = self.capture(&self.target_namespace, self.content) {
            spec.metadata
                .insert("targetNamespace".to_string(), Value::String(namespace));
        }

        let Some(port_type) = self.port_type.captures(self.content) else {
            debug!(spec = %spec.name, "no portType found");
            return spec;
        };
        let port_type_name = port_type.get(1).map_or("", |m| m.as_str());
        let body = port_type.get(2).map_or("", |m| m.as_str());

        let service_name = self
            .capture(&self.service, self.content)
            .unwrap_or_else(|| port_type_name.to_string());
        spec.metadata
            .insert("serviceName".to_string(), Value::String(service_name.clone()));
        spec.metadata.insert(
            "portType".to_string(),
            Value::String(port_type_name.to_string()),
        );

        for captures in self.operation.captures_iter(body) {
            let Some(name) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let mut op = ParsedOperation::new(format!("soap_{}", name), name, "soap");
            op.description = Some(format!("SOAP operation in {}", service_name));
            op.tags = vec!["soap".to_string(), service_name.to_lowercase()];
            spec.operations.push(op);
        }

        debug!(
            spec = %spec.name,
            operations = spec.operations.len(),
            "extracted SOAP operations"
        );
        spec
    }

    fn capture(&self, regex: &Regex, haystack: &str) -> Option<String> {
        regex
            .captures(haystack)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CatalogError::Parse(format!("Invalid WSDL pattern: {}", e)))
}
