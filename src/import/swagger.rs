//! Swagger 2.0 importer
//!
//! Loads a Swagger 2.0 document (JSON or YAML) into an [`ApiDocument`]:
//! - Local `#/definitions/...` and `#/parameters/...` references are resolved
//! - A definition that refers back into itself is marked with
//!   [`SchemaNode::recursive`] instead of being expanded forever
//! - Schemas nested deeper than the depth limit, or larger than the node
//!   budget, are cut off with [`SchemaNode::truncated`]
//! - Path-level parameters and document-level `consumes`/`produces` are
//!   merged into each operation

use anyhow::Context;
use serde_json::{Map, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::convert::properties::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::import::ImportError;
use crate::models::{
    ApiDocument, ApiInfo, HttpMethod, Literal, Operation, Parameter, ParameterLocation, PathItem,
    SchemaNode, SchemaTypes,
};

/// Default number of schema nodes expanded for one body parameter
pub const DEFAULT_MAX_SCHEMA_NODES: usize = 10_000;

/// Source document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Reusable sections a reference can point into
struct Components<'a> {
    definitions: Option<&'a Map<String, JsonValue>>,
    parameters: Option<&'a Map<String, JsonValue>>,
}

/// A fully expanded definition, reused for later references
#[derive(Debug, Clone)]
struct ExpandedDefinition {
    node: SchemaNode,
    /// Levels below the definition's own node
    height: usize,
    /// Nodes in the expanded tree
    nodes: usize,
}

/// Swagger Importer
///
/// Imports Swagger 2.0 YAML or JSON content into an [`ApiDocument`].
#[derive(Debug)]
pub struct SwaggerImporter {
    /// Non-fatal problems found while importing (skipped parameters,
    /// unresolvable references, dropped literals, truncated schemas)
    pub warnings: Vec<String>,
    max_depth: usize,
    max_schema_nodes: usize,
    /// Definitions expanded so far in the current document
    expanded: BTreeMap<String, ExpandedDefinition>,
    /// Nodes left for the schema being expanded
    remaining_nodes: usize,
    /// Whether the schema being expanded was cut off
    truncated: bool,
}

impl Default for SwaggerImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SwaggerImporter {
    /// Create a new SwaggerImporter
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_schema_nodes: DEFAULT_MAX_SCHEMA_NODES,
            expanded: BTreeMap::new(),
            remaining_nodes: 0,
            truncated: false,
        }
    }

    /// Cut off schema levels nested deeper than `max_depth`.
    ///
    /// Use the converter's `max_depth` so that nothing it would accept is
    /// truncated.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// Expand at most `max_schema_nodes` schema nodes per body parameter
    pub fn with_max_schema_nodes(mut self, max_schema_nodes: usize) -> Self {
        self.max_schema_nodes = max_schema_nodes;
        self
    }

    /// Detect format (YAML or JSON) from content
    pub fn detect_format(&self, content: &str) -> DocumentFormat {
        if content.trim_start().starts_with('{') {
            DocumentFormat::Json
        } else {
            DocumentFormat::Yaml
        }
    }

    /// Read and import a document from disk
    pub fn import_file(&mut self, path: &Path) -> anyhow::Result<ApiDocument> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.parse(&content)
            .with_context(|| format!("Failed to import {}", path.display()))
    }

    /// Import Swagger content.
    ///
    /// # Arguments
    ///
    /// * `content` - The Swagger 2.0 document as JSON or YAML text.
    ///
    /// # Returns
    ///
    /// The parsed document, or an error if the content is not a Swagger 2.0
    /// document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swagger_collection_sdk::import::SwaggerImporter;
    ///
    /// let yaml = r#"
    /// swagger: "2.0"
    /// info:
    ///   title: Petstore
    ///   version: "1.0"
    /// paths:
    ///   /pets:
    ///     get:
    ///       produces: [application/json]
    ///       responses:
    ///         200:
    ///           description: ok
    /// "#;
    /// let document = SwaggerImporter::new().parse(yaml).unwrap();
    /// assert_eq!(document.info.title, "Petstore");
    /// assert_eq!(document.operation_count(), 1);
    /// ```
    pub fn parse(&mut self, content: &str) -> Result<ApiDocument, ImportError> {
        let root: JsonValue = match self.detect_format(content) {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| ImportError::ParseError(format!("Invalid JSON: {}", e)))?,
            DocumentFormat::Yaml => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| ImportError::ParseError(format!("Invalid YAML: {}", e)))?;
                yaml_to_json(yaml)
            }
        };

        let root = root.as_object().ok_or_else(|| {
            ImportError::InvalidDocument("Document root is not an object".to_string())
        })?;
        check_version(root)?;
        self.expanded.clear();

        let components = Components {
            definitions: root.get("definitions").and_then(|v| v.as_object()),
            parameters: root.get("parameters").and_then(|v| v.as_object()),
        };

        let consumes = string_list(root.get("consumes"));
        let produces = string_list(root.get("produces"));

        let mut paths = Vec::new();
        if let Some(path_map) = root.get("paths").and_then(|v| v.as_object()) {
            for (path, path_value) in path_map {
                let Some(path_obj) = path_value.as_object() else {
                    self.warn(format!("Path '{}' is not an object", path));
                    continue;
                };
                let operations =
                    self.parse_path_item(path, path_obj, &components, &consumes, &produces);
                if !operations.is_empty() {
                    paths.push(PathItem {
                        path: path.clone(),
                        operations,
                    });
                }
            }
        }

        let document = ApiDocument {
            info: self.parse_info(root.get("info")),
            host: string_field(root, "host"),
            base_path: string_field(root, "basePath"),
            schemes: string_list(root.get("schemes")),
            consumes,
            produces,
            paths,
        };
        debug!(
            "Imported '{}' with {} operations across {} paths",
            document.info.title,
            document.operation_count(),
            document.paths.len()
        );
        Ok(document)
    }

    fn parse_info(&mut self, info: Option<&JsonValue>) -> ApiInfo {
        let Some(info) = info.and_then(|v| v.as_object()) else {
            self.warn("Document has no info block".to_string());
            return ApiInfo {
                title: "Untitled API".to_string(),
                ..Default::default()
            };
        };
        ApiInfo {
            title: string_field(info, "title").unwrap_or_else(|| "Untitled API".to_string()),
            version: scalar_text(info.get("version")).unwrap_or_default(),
            description: string_field(info, "description"),
        }
    }

    fn parse_path_item(
        &mut self,
        path: &str,
        path_obj: &Map<String, JsonValue>,
        components: &Components<'_>,
        consumes: &[String],
        produces: &[String],
    ) -> Vec<(HttpMethod, Operation)> {
        let shared: Vec<Parameter> = path_obj
            .get("parameters")
            .and_then(|v| v.as_array())
            .map(|params| {
                params
                    .iter()
                    .filter_map(|p| self.parse_parameter(p, components))
                    .collect()
            })
            .unwrap_or_default();

        let mut operations = Vec::new();
        for method in HttpMethod::ALL {
            let Some(op_obj) = path_obj.get(method.as_str()).and_then(|v| v.as_object()) else {
                continue;
            };
            let mut operation = self.parse_operation(op_obj, components, consumes, produces);
            merge_shared_parameters(&mut operation.parameters, &shared);
            debug!(
                "Parsed {} {} with {} parameters",
                method,
                path,
                operation.parameters.len()
            );
            operations.push((method, operation));
        }
        operations
    }

    fn parse_operation(
        &mut self,
        op_obj: &Map<String, JsonValue>,
        components: &Components<'_>,
        consumes: &[String],
        produces: &[String],
    ) -> Operation {
        let parameters = op_obj
            .get("parameters")
            .and_then(|v| v.as_array())
            .map(|params| {
                params
                    .iter()
                    .filter_map(|p| self.parse_parameter(p, components))
                    .collect()
            })
            .unwrap_or_default();

        let extensions: BTreeMap<String, JsonValue> = op_obj
            .iter()
            .filter(|(key, _)| key.to_lowercase().starts_with("x-"))
            .map(|(key, value)| (key.to_lowercase(), value.clone()))
            .collect();

        Operation {
            operation_id: string_field(op_obj, "operationId"),
            summary: string_field(op_obj, "summary"),
            description: string_field(op_obj, "description"),
            tags: string_list(op_obj.get("tags")),
            consumes: match op_obj.get("consumes") {
                Some(value) => string_list(Some(value)),
                None => consumes.to_vec(),
            },
            produces: match op_obj.get("produces") {
                Some(value) => string_list(Some(value)),
                None => produces.to_vec(),
            },
            parameters,
            extensions,
        }
    }

    fn parse_parameter(
        &mut self,
        value: &JsonValue,
        components: &Components<'_>,
    ) -> Option<Parameter> {
        let mut obj = value.as_object()?;

        if let Some(reference) = obj.get("$ref").and_then(|v| v.as_str()) {
            let resolved = reference
                .strip_prefix("#/parameters/")
                .map(unescape_pointer)
                .and_then(|name| components.parameters?.get(&name))
                .and_then(|v| v.as_object());
            match resolved {
                Some(target) => obj = target,
                None => {
                    self.warn(format!("Unresolvable parameter reference '{}'", reference));
                    return None;
                }
            }
        }

        let Some(name) = string_field(obj, "name") else {
            self.warn("Parameter without a name skipped".to_string());
            return None;
        };
        let location_text = string_field(obj, "in").unwrap_or_default();
        let location = match location_text.parse::<ParameterLocation>() {
            Ok(location) => location,
            Err(e) => {
                self.warn(format!("Parameter '{}' skipped: {}", name, e));
                return None;
            }
        };

        let schema = match (location, obj.get("schema")) {
            (ParameterLocation::Body, Some(schema)) => {
                Some(self.parse_body_schema(&name, schema, components))
            }
            _ => None,
        };

        let example = if obj.contains_key("example") {
            self.literal(obj.get("example"), &name)
        } else {
            self.literal(obj.get("x-example"), &name)
        };

        Some(Parameter {
            default: self.literal(obj.get("default"), &name),
            example,
            name,
            location,
            required: obj.get("required").and_then(|v| v.as_bool()).unwrap_or(false),
            schema,
            param_type: string_field(obj, "type"),
            format: string_field(obj, "format"),
            description: string_field(obj, "description"),
        })
    }

    /// Expand the schema of a body parameter within the node budget
    fn parse_body_schema(
        &mut self,
        name: &str,
        schema: &JsonValue,
        components: &Components<'_>,
    ) -> SchemaNode {
        self.remaining_nodes = self.max_schema_nodes;
        self.truncated = false;

        let node = self.parse_schema(schema, components, &mut Vec::new(), 0);
        if self.truncated {
            self.warn(format!(
                "Schema of body parameter '{}' truncated at depth {} or {} nodes",
                name, self.max_depth, self.max_schema_nodes
            ));
        }
        node
    }

    /// Parse a schema object, resolving local definition references.
    ///
    /// `stack` holds the definitions being expanded on the current branch and
    /// `depth` is the nesting level below the parameter's root schema.
    fn parse_schema(
        &mut self,
        value: &JsonValue,
        components: &Components<'_>,
        stack: &mut Vec<String>,
        depth: usize,
    ) -> SchemaNode {
        let Some(obj) = value.as_object() else {
            return SchemaNode::default();
        };

        if let Some(reference) = obj.get("$ref").and_then(|v| v.as_str()) {
            return self.resolve_schema_ref(reference, components, stack, depth);
        }

        if depth > self.max_depth || self.remaining_nodes == 0 {
            self.truncated = true;
            return SchemaNode::truncated();
        }
        self.remaining_nodes -= 1;

        let properties: BTreeMap<String, SchemaNode> = obj
            .get("properties")
            .and_then(|v| v.as_object())
            .map(|props| {
                props
                    .iter()
                    .map(|(name, schema)| {
                        let node = self.parse_schema(schema, components, stack, depth + 1);
                        (name.clone(), node)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let items = match obj.get("items") {
            Some(JsonValue::Array(tuple)) => tuple.first(),
            Some(other) => Some(other),
            None => None,
        }
        .map(|items| Box::new(self.parse_schema(items, components, stack, depth + 1)));

        let mut types: Vec<String> = match obj.get("type") {
            Some(JsonValue::String(kind)) => vec![kind.clone()],
            Some(JsonValue::Array(kinds)) => kinds
                .iter()
                .filter_map(|k| k.as_str().map(|s| s.to_string()))
                .collect(),
            _ => Vec::new(),
        };
        if types.is_empty() {
            if !properties.is_empty() {
                types.push("object".to_string());
            } else if items.is_some() {
                types.push("array".to_string());
            }
        }

        let label = string_field(obj, "title").unwrap_or_else(|| "schema".to_string());
        SchemaNode {
            types: SchemaTypes::new(types),
            format: string_field(obj, "format"),
            default: self.literal(obj.get("default"), &label),
            example: self.literal(obj.get("example"), &label),
            properties,
            items,
            description: string_field(obj, "description"),
            recursive_ref: None,
            truncated: false,
        }
    }

    /// Resolve a definition reference at `depth`.
    ///
    /// Definitions that are themselves plain references are followed in a
    /// loop. A definition expanded without cut-offs is cached and reused while
    /// it still fits the depth limit and node budget.
    fn resolve_schema_ref(
        &mut self,
        reference: &str,
        components: &Components<'_>,
        stack: &mut Vec<String>,
        depth: usize,
    ) -> SchemaNode {
        let mut reference = reference.to_string();
        let mut aliases = BTreeSet::new();

        let (name, definition) = loop {
            let Some(name) = reference
                .strip_prefix("#/definitions/")
                .map(unescape_pointer)
            else {
                self.warn(format!("Unsupported schema reference '{}'", reference));
                return SchemaNode::default();
            };

            if stack.contains(&name) || !aliases.insert(name.clone()) {
                debug!("Definition '{}' refers back to itself", name);
                return SchemaNode::recursive(name);
            }

            let Some(definition) = components.definitions.and_then(|defs| defs.get(&name)) else {
                self.warn(format!("Unresolvable schema reference '{}'", reference));
                return SchemaNode::default();
            };

            match definition.get("$ref").and_then(|v| v.as_str()) {
                Some(next) => reference = next.to_string(),
                None => break (name, definition),
            }
        };

        if let Some(cached) = self.expanded.get(&name)
            && depth + cached.height <= self.max_depth
            && cached.nodes <= self.remaining_nodes
        {
            self.remaining_nodes -= cached.nodes;
            return cached.node.clone();
        }

        let budget_before = self.remaining_nodes;
        stack.push(name.clone());
        let node = self.parse_schema(definition, components, stack, depth);
        stack.pop();

        if let Some(height) = expanded_height(&node) {
            self.expanded.insert(
                name,
                ExpandedDefinition {
                    node: node.clone(),
                    height,
                    nodes: budget_before - self.remaining_nodes,
                },
            );
        }
        node
    }

    /// Convert a declared default/example, reporting structured values that
    /// cannot be kept
    fn literal(&mut self, value: Option<&JsonValue>, owner: &str) -> Literal {
        if let Some(JsonValue::Array(_) | JsonValue::Object(_)) = value {
            self.warn(format!("Structured default/example of '{}' dropped", owner));
        }
        Literal::from_json(value)
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Height of a tree without placeholders, `None` if any node is one
fn expanded_height(node: &SchemaNode) -> Option<usize> {
    if node.is_placeholder() {
        return None;
    }
    let mut height = 0;
    for child in node.properties.values().chain(node.items.as_deref()) {
        height = height.max(expanded_height(child)? + 1);
    }
    Some(height)
}

/// Reject anything that is not a Swagger 2.x document
fn check_version(root: &Map<String, JsonValue>) -> Result<(), ImportError> {
    if let Some(version) = scalar_text(root.get("openapi")) {
        return Err(ImportError::UnsupportedVersion(format!(
            "OpenAPI {} documents are not supported, expected Swagger 2.0",
            version
        )));
    }
    match scalar_text(root.get("swagger")) {
        Some(version) if version.starts_with("2.") => Ok(()),
        Some(version) => Err(ImportError::UnsupportedVersion(format!(
            "Swagger {}",
            version
        ))),
        None => Err(ImportError::InvalidDocument(
            "Missing 'swagger' version field".to_string(),
        )),
    }
}

/// Add path-level parameters not overridden by the operation (same name and
/// location)
fn merge_shared_parameters(parameters: &mut Vec<Parameter>, shared: &[Parameter]) {
    let inherited: Vec<Parameter> = shared
        .iter()
        .filter(|s| {
            !parameters
                .iter()
                .any(|p| p.name == s.name && p.location == s.location)
        })
        .cloned()
        .collect();
    parameters.splice(0..0, inherited);
}

fn string_field(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Text of a string or number field (versions are often unquoted in YAML)
fn scalar_text(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Decode a JSON pointer token (`~1` is `/`, `~0` is `~`)
fn unescape_pointer(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Convert YAML to JSON, stringifying non-string mapping keys such as
/// unquoted response codes
fn yaml_to_json(value: serde_yaml::Value) -> JsonValue {
    match value {
        serde_yaml::Value::Null => JsonValue::Null,
        serde_yaml::Value::Bool(b) => JsonValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::Null)
            }
        }
        serde_yaml::Value::String(s) => JsonValue::String(s),
        serde_yaml::Value::Sequence(seq) => {
            JsonValue::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut obj = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => serde_yaml::to_string(&other)
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                };
                obj.insert(key, yaml_to_json(value));
            }
            JsonValue::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
