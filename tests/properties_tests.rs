//! Tests for the property tree builder

use serde_json::{Value, json};
use std::collections::BTreeMap;
use swagger_collection_sdk::convert::{ConversionError, PropertyTreeBuilder};
use swagger_collection_sdk::models::SchemaNode;

/// Object schema nested `levels` deep: {"next": {"next": ... {"leaf": 0}}}
fn nested(levels: usize) -> SchemaNode {
    let mut node = SchemaNode::object([("leaf", SchemaNode::of_type("integer"))]);
    for _ in 1..levels {
        node = SchemaNode::object([("next", node)]);
    }
    node
}

/// Key sets and nesting shape must mirror the schema
fn assert_mirrors(schema: &SchemaNode, value: &Value) {
    if schema.is_object() {
        let object = value.as_object().expect("object expected");
        let keys: Vec<&String> = object.keys().collect();
        let expected: Vec<&String> = schema.properties.keys().collect();
        assert_eq!(keys, expected);
        for (name, child) in &schema.properties {
            assert_mirrors(child, &object[name]);
        }
    } else if schema.is_array() {
        let array = value.as_array().expect("array expected");
        assert_eq!(array.len(), 1);
        if let Some(items) = schema.items.as_deref() {
            assert_mirrors(items, &array[0]);
        }
    } else {
        assert!(!value.is_object() && !value.is_array());
    }
}

mod structure_tests {
    use super::*;

    #[test]
    fn test_build_mirrors_schema_structure() {
        let tag = SchemaNode::object([("label", SchemaNode::of_type("string"))]);
        let schema = SchemaNode::object([
            ("id", SchemaNode::of_type("integer").with_format("int64")),
            ("name", SchemaNode::of_type("string")),
            (
                "owner",
                SchemaNode::object([
                    ("email", SchemaNode::of_type("string").with_format("email")),
                    ("verified", SchemaNode::of_type("boolean")),
                ]),
            ),
            ("tags", SchemaNode::array(tag)),
            (
                "matrix",
                SchemaNode::array(SchemaNode::array(SchemaNode::of_type("number"))),
            ),
        ]);

        let value = PropertyTreeBuilder::default()
            .build_value(&schema.properties)
            .unwrap();
        assert_mirrors(&schema, &value);
        assert_eq!(value["owner"]["email"], "user@example.com");
        assert_eq!(value["matrix"], json!([[0.0]]));
    }

    #[test]
    fn test_build_output_is_tab_indented() {
        let schema = SchemaNode::object([("id", SchemaNode::of_type("integer"))]);
        let text = PropertyTreeBuilder::default()
            .build(&schema.properties)
            .unwrap();
        assert_eq!(text, "{\n\t\"id\": 0\n}");
    }

    #[test]
    fn test_empty_properties_build_empty_object() {
        let text = PropertyTreeBuilder::default()
            .build(&BTreeMap::new())
            .unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_leaf_defaults_are_honoured() {
        let schema = SchemaNode::object([
            ("status", SchemaNode::of_type("string").with_default("available")),
            ("count", SchemaNode::of_type("integer").with_example(3_i64)),
        ]);
        let value = PropertyTreeBuilder::default()
            .build_value(&schema.properties)
            .unwrap();
        assert_eq!(value, json!({"count": 3, "status": "available"}));
    }

    #[test]
    fn test_array_without_items_uses_fallback() {
        let mut list = SchemaNode::of_type("array");
        list.items = None;
        let schema = SchemaNode::object([("list", list)]);
        let value = PropertyTreeBuilder::default()
            .build_value(&schema.properties)
            .unwrap();
        assert_eq!(value, json!({"list": ["string"]}));
    }
}

mod limit_tests {
    use super::*;

    #[test]
    fn test_depth_within_limit_terminates() {
        let schema = nested(10);
        let value = PropertyTreeBuilder::new(10)
            .build_value(&schema.properties)
            .unwrap();
        assert_mirrors(&schema, &value);
    }

    #[test]
    fn test_depth_beyond_limit_is_reported() {
        let schema = nested(10);
        let result = PropertyTreeBuilder::new(9).build_value(&schema.properties);
        assert!(matches!(result, Err(ConversionError::SchemaTooDeep { limit: 9 })));
    }

    #[test]
    fn test_default_limit_rejects_deep_schema() {
        let schema = nested(40);
        let result = PropertyTreeBuilder::default().build(&schema.properties);
        assert!(result.is_err());
    }

    #[test]
    fn test_recursive_reference_is_reported() {
        let schema = SchemaNode::object([
            ("name", SchemaNode::of_type("string")),
            ("parent", SchemaNode::recursive("Category")),
        ]);
        let result = PropertyTreeBuilder::default().build(&schema.properties);
        match result {
            Err(ConversionError::CyclicSchema(name)) => assert_eq!(name, "Category"),
            other => panic!("expected cyclic schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_recursive_array_items_are_reported() {
        let children = SchemaNode::array(SchemaNode::recursive("Node"));
        let schema = SchemaNode::object([("children", children)]);
        let result = PropertyTreeBuilder::default().build(&schema.properties);
        assert!(matches!(result, Err(ConversionError::CyclicSchema(_))));
    }
}
