//! Property tree builder
//!
//! Walks a mapping of named schemas and produces the matching example
//! document. Nesting is bounded by a depth limit so that runaway or
//! self-referencing schemas are reported instead of recursing forever.

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;

use super::ConversionError;
use super::value::{FALLBACK_TEXT, leaf_value};
use crate::models::SchemaNode;

/// Default nesting limit for generated documents
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Largest accepted nesting limit
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Serialize a value as tab-indented JSON
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ConversionError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| ConversionError::Serialization(e.to_string()))
}

/// Builds example documents from object properties
///
/// # Example
///
/// ```rust
/// use swagger_collection_sdk::convert::PropertyTreeBuilder;
/// use swagger_collection_sdk::models::SchemaNode;
///
/// let pet = SchemaNode::object([
///     ("id", SchemaNode::of_type("integer")),
///     ("tags", SchemaNode::array(SchemaNode::of_type("string"))),
/// ]);
/// let builder = PropertyTreeBuilder::default();
/// let value = builder.build_value(&pet.properties).unwrap();
/// assert_eq!(value["id"], 0);
/// assert_eq!(value["tags"][0], "string");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertyTreeBuilder {
    max_depth: usize,
}

impl Default for PropertyTreeBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PropertyTreeBuilder {
    /// Create a builder that rejects documents nested deeper than `max_depth`
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the example document for `properties`, pretty-printed
    pub fn build(
        &self,
        properties: &BTreeMap<String, SchemaNode>,
    ) -> Result<String, ConversionError> {
        to_pretty_json(&self.build_value(properties)?)
    }

    /// Build the example document for `properties` as a JSON value
    pub fn build_value(
        &self,
        properties: &BTreeMap<String, SchemaNode>,
    ) -> Result<JsonValue, ConversionError> {
        self.object_value(properties, 1)
    }

    /// Example value of a single schema, nested at depth 1
    pub fn node_value(&self, node: &SchemaNode) -> Result<JsonValue, ConversionError> {
        self.value_at(node, 1)
    }

    fn object_value(
        &self,
        properties: &BTreeMap<String, SchemaNode>,
        depth: usize,
    ) -> Result<JsonValue, ConversionError> {
        self.check_depth(depth)?;
        let mut document = serde_json::Map::new();
        for (name, node) in properties {
            document.insert(name.clone(), self.value_at(node, depth)?);
        }
        Ok(JsonValue::Object(document))
    }

    /// Reject placeholders left by the importer.
    ///
    /// A recursive reference fails with [`ConversionError::CyclicSchema`], a
    /// truncated schema with [`ConversionError::SchemaTooDeep`].
    pub fn ensure_expanded(&self, node: &SchemaNode) -> Result<(), ConversionError> {
        if let Some(reference) = &node.recursive_ref {
            return Err(ConversionError::CyclicSchema(reference.clone()));
        }
        if node.truncated {
            return Err(ConversionError::SchemaTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn value_at(&self, node: &SchemaNode, depth: usize) -> Result<JsonValue, ConversionError> {
        self.ensure_expanded(node)?;

        if node.is_object() {
            return self.object_value(&node.properties, depth + 1);
        }

        if node.is_array() {
            self.check_depth(depth + 1)?;
            let element = match node.items.as_deref() {
                Some(items) if items.is_object() || items.is_array() => {
                    self.value_at(items, depth + 1)?
                }
                Some(items) => {
                    self.ensure_expanded(items)?;
                    leaf_value(items)
                }
                None => JsonValue::from(FALLBACK_TEXT),
            };
            return Ok(JsonValue::Array(vec![element]));
        }

        Ok(leaf_value(node))
    }

    fn check_depth(&self, depth: usize) -> Result<(), ConversionError> {
        if depth > self.max_depth {
            Err(ConversionError::SchemaTooDeep {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_uses_tabs() {
        let text = to_pretty_json(&json!({"a": 1})).unwrap();
        assert_eq!(text, "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_truncated_node_reports_depth() {
        let schema = SchemaNode::object([("next", SchemaNode::truncated())]);
        let builder = PropertyTreeBuilder::new(7);
        assert_eq!(builder.max_depth(), 7);
        assert!(matches!(
            builder.build_value(&schema.properties),
            Err(ConversionError::SchemaTooDeep { limit: 7 })
        ));
    }

    #[test]
    fn test_depth_limit_counts_nested_levels() {
        // properties -> child object -> grandchild object: three levels
        let grandchild = SchemaNode::object([("x", SchemaNode::of_type("integer"))]);
        let child = SchemaNode::object([("grandchild", grandchild)]);
        let schema = SchemaNode::object([("child", child)]);

        assert!(
            PropertyTreeBuilder::new(3)
                .build_value(&schema.properties)
                .is_ok()
        );
        assert!(matches!(
            PropertyTreeBuilder::new(2).build_value(&schema.properties),
            Err(ConversionError::SchemaTooDeep { limit: 2 })
        ));
    }
}
