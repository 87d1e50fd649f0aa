//! GraphQL SDL operation scanner
//!
//! Line-based: a line starting with `query `, `mutation ` or `subscription `
//! yields one operation. No field or type analysis is performed.

use crate::document::preview;
use serde_json::Value;
use spec_catalog_common::{ImportConfig, ParsedOperation, ParsedSpecification, SpecificationKind};
use tracing::debug;

/// Operation keywords and the name used when a declaration is anonymous
const KEYWORDS: &[(&str, &str)] = &[
    ("query", "Query"),
    ("mutation", "Mutation"),
    ("subscription", "Subscription"),
];

/// GraphQL operation extractor
pub struct GraphQlExtractor<'a> {
    content: &'a str,
    spec_name: String,
    config: ImportConfig,
}

impl<'a> GraphQlExtractor<'a> {
    pub fn new(content: &'a str, spec_name: &str) -> Self {
        Self {
            content,
            spec_name: spec_name.to_string(),
            config: ImportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: &ImportConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Scan the document for operation declarations
    ///
    /// Never fails: a document without declarations has zero operations.
    pub fn parse(&self) -> ParsedSpecification {
        let mut spec = ParsedSpecification::new(self.spec_name.clone(), SpecificationKind::Graphql);
        spec.metadata.insert(
            "preview".to_string(),
            Value::String(preview(self.content, self.config.preview_chars)),
        );

        for line in self.content.lines() {
            if let Some((keyword, name)) = parse_declaration(line.trim()) {
                let mut op = ParsedOperation::new(format!("{}_{}", keyword, name), name, keyword);
                op.tags = vec!["graphql".to_string(), keyword.to_string()];
                spec.operations.push(op);
            }
        }

        debug!(
            spec = %spec.name,
            operations = spec.operations.len(),
            "extracted GraphQL operations"
        );
        spec
    }
}

/// Split `query GetUser($id: ID!) {` into ("query", "GetUser")
fn parse_declaration(line: &str) -> Option<(&'static str, String)> {
    KEYWORDS.iter().find_map(|(keyword, default_name)| {
        let rest = line.strip_prefix(keyword)?.strip_prefix(' ')?;
        let name: String = rest
            .trim_start()
            .chars()
            .take_while(|c| *c != '(' && *c != '{' && *c != '@' && !c.is_whitespace())
            .collect();
        let name = if name.is_empty() {
            default_name.to_string()
        } else {
            name
        };
        Some((*keyword, name))
    })
}
