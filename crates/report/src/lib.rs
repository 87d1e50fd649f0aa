//! Markdown rendering of parsed specification catalogs
//!
//! One section per specification: kind, version and id, then either an
//! operation table or the list of errors for a document that failed to parse.

mod templates;

use spec_catalog_common::{CatalogError, ParsedSpecification, Result};
use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use tracing::debug;

const DEFAULT_TITLE: &str = "Specification Catalog";

/// Catalog renderer
pub struct CatalogRenderer {
    tera: Tera,
    title: String,
}

impl CatalogRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tera: templates::load_templates()?,
            title: DEFAULT_TITLE.to_string(),
        })
    }

    /// Override the top-level heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render the catalog to a Markdown string
    pub fn render_markdown(&self, specs: &[ParsedSpecification]) -> Result<String> {
        let context = self.create_context(specs);
        self.tera
            .render("catalog.md", &context)
            .map_err(|e| CatalogError::Render(format!("Template error: {:?}", e)))
    }

    /// Render the catalog and write it to `path`, creating parent directories
    pub fn write_markdown(&self, specs: &[ParsedSpecification], path: &Path) -> Result<()> {
        let rendered = self.render_markdown(specs)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CatalogError::Render(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(path, rendered).map_err(|e| {
            CatalogError::Render(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), specs = specs.len(), "wrote catalog report");
        Ok(())
    }

    fn create_context(&self, specs: &[ParsedSpecification]) -> Context {
        let total_operations: usize = specs.iter().map(|s| s.operations.len()).sum();
        let failed = specs.iter().filter(|s| s.is_failed()).count();

        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("specs", specs);
        context.insert("total_operations", &total_operations);
        context.insert("failed", &failed);
        context
    }
}
