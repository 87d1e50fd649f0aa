//! Template loading and management

use spec_catalog_common::{CatalogError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("call_shape_label", call_shape_label_filter);
    tera.register_filter("md_cell", md_cell_filter);

    tera.add_raw_template("catalog.md", include_str!("../templates/catalog.md.tera"))
        .map_err(|e| CatalogError::Render(format!("Failed to load catalog.md template: {}", e)))?;

    Ok(tera)
}

/// Filter to turn a serialized call shape ("client-streaming") into a label
fn call_shape_label_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let shape = match value {
        Value::Null => return Ok(Value::String(String::new())),
        Value::String(s) => s.as_str(),
        _ => return Err(tera::Error::msg("call_shape_label filter expects a string")),
    };

    let label = match shape {
        "unary" => "Unary",
        "client-streaming" => "Client streaming",
        "server-streaming" => "Server streaming",
        "bidirectional" => "Bidirectional streaming",
        other => other,
    };

    Ok(Value::String(label.to_string()))
}

/// Filter to make a value safe inside a Markdown table cell
fn md_cell_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let cell = text
        .replace('|', "\\|")
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Value::String(cell))
}
