//! Flattens `#/components/...` references into self-contained JSON Schemas
//!
//! The referenced node becomes the root of a new draft-07 schema, and every
//! schema transitively reachable from it is copied into a flat `definitions`
//! map keyed by name. References are rewritten from `#/components/<section>/X`
//! to `#/definitions/X`, so the result no longer depends on the source
//! document. A visited-name set makes the walk terminate on cyclic graphs and
//! guarantees each definition is emitted once.

use serde_json::{Map, Value};
use spec_catalog_common::DEFAULT_SCHEMA_ID_PREFIX;
use std::collections::HashSet;
use tracing::debug;

/// Namespace every resolvable reference must live under
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// Local namespace references are rewritten into
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Meta-schema URI written to `$schema`
pub const JSON_SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// A standalone schema produced by [`SchemaResolver`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    /// Reference with its `#/components/<section>/` prefix stripped
    pub name: String,

    /// Root node plus `definitions`, `$id` and `$schema`
    pub schema: Value,
}

/// Resolves references against a private copy of a `components` object
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    components: Value,
    id_prefix: String,
}

impl SchemaResolver {
    /// Create a resolver over a deep copy of `components`
    ///
    /// The caller's value is never touched again.
    pub fn new(components: &Value) -> Self {
        Self {
            components: components.clone(),
            id_prefix: DEFAULT_SCHEMA_ID_PREFIX.to_string(),
        }
    }

    /// Set the domain prefix used to build `$id`
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Resolve a `#/components/...` reference into a self-contained schema
    ///
    /// Returns `None` for references outside the components namespace.
    /// A reference to a missing node resolves to an empty schema.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use spec_catalog_parser::schema::SchemaResolver;
    ///
    /// let components = json!({
    ///     "schemas": {
    ///         "Pet": { "type": "object", "properties": { "owner": { "$ref": "#/components/schemas/Owner" } } },
    ///         "Owner": { "type": "object" }
    ///     }
    /// });
    /// let resolved = SchemaResolver::new(&components).resolve("#/components/schemas/Pet").unwrap();
    /// assert_eq!(resolved.name, "Pet");
    /// assert_eq!(resolved.schema["properties"]["owner"]["$ref"], "#/definitions/Owner");
    /// assert!(resolved.schema["definitions"].get("Owner").is_some());
    /// ```
    pub fn resolve(&self, reference: &str) -> Option<ResolvedSchema> {
        let Some((_, name)) = rewrite_reference(reference) else {
            debug!(reference, "skipping reference outside components");
            return None;
        };

        let mut root = self.lookup(reference);
        let definitions = self.flatten(&mut root);

        Some(ResolvedSchema {
            schema: self.finish(&name, root, definitions),
            name,
        })
    }

    /// Make an embedded schema self-contained
    ///
    /// The node is cloned and any references inside it are rewritten and
    /// collected exactly as [`SchemaResolver::resolve`] does.
    pub fn resolve_inline(&self, name: &str, node: &Value) -> ResolvedSchema {
        let mut root = node.clone();
        let definitions = self.flatten(&mut root);

        ResolvedSchema {
            name: name.to_string(),
            schema: self.finish(name, root, definitions),
        }
    }

    /// Fetch and normalize a copy of the node a reference points at
    fn lookup(&self, reference: &str) -> Value {
        let path = reference.strip_prefix(COMPONENTS_PREFIX).unwrap_or_default();

        let mut current = &self.components;
        for segment in path.split('/') {
            match current.get(unescape_segment(segment).as_str()) {
                Some(next) => current = next,
                None => {
                    debug!(reference, segment, "reference target missing, using empty schema");
                    return Value::Object(Map::new());
                }
            }
        }

        let mut node = current.clone();
        normalize_message(&mut node);
        node
    }

    /// Rewrite every reference below `root` and collect their targets
    fn flatten(&self, root: &mut Value) -> Map<String, Value> {
        let mut definitions = Map::new();
        let mut visited = HashSet::new();
        self.collect(root, &mut definitions, &mut visited);
        definitions
    }

    /// Walk every nested object and array, rewriting references on the way
    fn collect(
        &self,
        node: &mut Value,
        definitions: &mut Map<String, Value>,
        visited: &mut HashSet<String>,
    ) {
        let obj = match node {
            Value::Object(obj) => obj,
            Value::Array(entries) => {
                for entry in entries {
                    self.collect(entry, definitions, visited);
                }
                return;
            }
            _ => return,
        };

        let reference = obj.get("$ref").and_then(Value::as_str).map(String::from);
        if let Some(reference) = reference {
            if let Some((rewritten, key)) = rewrite_reference(&reference) {
                obj.insert("$ref".to_string(), Value::String(rewritten));
                self.define(&reference, key, definitions, visited);
            }
        }

        for (keyword, child) in obj.iter_mut() {
            if keyword != "$ref" {
                self.collect(child, definitions, visited);
            }
        }
    }

    /// Copy a referenced schema into `definitions` unless already present
    fn define(
        &self,
        reference: &str,
        key: String,
        definitions: &mut Map<String, Value>,
        visited: &mut HashSet<String>,
    ) {
        if !visited.insert(key.clone()) {
            return;
        }

        let mut target = self.lookup(reference);
        self.collect(&mut target, definitions, visited);
        definitions.insert(key, target);
    }

    fn finish(&self, name: &str, root: Value, definitions: Map<String, Value>) -> Value {
        let mut schema = Map::new();
        schema.insert(
            "$schema".to_string(),
            Value::String(JSON_SCHEMA_DRAFT_07.to_string()),
        );
        schema.insert(
            "$id".to_string(),
            Value::String(format!("{}{}", self.id_prefix, name)),
        );

        if let Value::Object(fields) = root {
            for (key, value) in fields {
                if !matches!(key.as_str(), "$schema" | "$id" | "definitions") {
                    schema.insert(key, value);
                }
            }
        }

        schema.insert("definitions".to_string(), Value::Object(definitions));
        Value::Object(schema)
    }
}

/// Splice an AsyncAPI message's `payload` up one level
///
/// `payload` and `headers` are dropped so the message reads as a plain schema.
/// Nodes without an object `payload` are left alone.
pub fn normalize_message(node: &mut Value) {
    let Value::Object(obj) = node else {
        return;
    };
    let Some(Value::Object(payload)) = obj.remove("payload") else {
        return;
    };

    obj.remove("headers");
    for (key, value) in payload {
        obj.insert(key, value);
    }
}

/// Map `#/components/<section>/<name>` to (`#/definitions/<name>`, name)
///
/// The returned name is the JSON-pointer-unescaped remainder after the
/// section, so nested pointers keep a stable, unique definition key.
pub fn rewrite_reference(reference: &str) -> Option<(String, String)> {
    let rest = reference.strip_prefix(COMPONENTS_PREFIX)?;
    let (_section, name) = rest.split_once('/')?;
    if name.is_empty() {
        return None;
    }

    let key = name
        .split('/')
        .map(unescape_segment)
        .collect::<Vec<_>>()
        .join("/");
    let rewritten = format!("{}{}", DEFINITIONS_PREFIX, escape_segment(&key));

    Some((rewritten, key))
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
