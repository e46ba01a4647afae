//! Tests for request item building

use serde_json::json;
use std::collections::BTreeMap;
use swagger_collection_sdk::config::ConversionSection;
use swagger_collection_sdk::convert::{ConversionError, HeaderSession, RequestItemBuilder};
use swagger_collection_sdk::models::{
    BodyMode, LiteralCoercion, Operation, Parameter, ParameterLocation, SchemaNode,
};

fn pet_body() -> Parameter {
    Parameter::new("pet", ParameterLocation::Body)
        .required(true)
        .with_schema(SchemaNode::object([
            ("id", SchemaNode::of_type("integer")),
            ("name", SchemaNode::of_type("string")),
        ]))
}

fn operation(parameters: Vec<Parameter>) -> Operation {
    Operation {
        consumes: vec!["application/json".to_string()],
        produces: vec!["application/json".to_string()],
        parameters,
        ..Default::default()
    }
}

mod method_tests {
    use super::*;

    #[test]
    fn test_method_is_upper_cased() {
        let mut headers = HeaderSession::new();
        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets", "post", &operation(vec![pet_body()]))
            .unwrap();
        assert_eq!(item.request.method, "POST");
        assert_eq!(item.name, "/pets");
    }

    #[test]
    fn test_non_mutating_methods_have_no_body() {
        for method in ["get", "delete", "head", "options", "GET"] {
            let mut headers = HeaderSession::new();
            let op = operation(vec![
                pet_body(),
                Parameter::new("file", ParameterLocation::FormData).required(true),
            ]);
            let item = RequestItemBuilder::default()
                .build_item(&mut headers, "/pets", method, &op)
                .unwrap();
            assert!(
                item.request.body.is_none(),
                "{} should not carry a body",
                method
            );
        }
    }

    #[test]
    fn test_mutating_methods_carry_body() {
        for method in ["post", "put", "patch"] {
            let mut headers = HeaderSession::new();
            let item = RequestItemBuilder::default()
                .build_item(&mut headers, "/pets", method, &operation(vec![pet_body()]))
                .unwrap();
            let body = item.request.body.expect("body expected");
            assert_eq!(body.mode(), BodyMode::Raw);
            let document: serde_json::Value = serde_json::from_str(body.raw().unwrap()).unwrap();
            assert_eq!(document, json!({"id": 0, "name": "string"}));
        }
    }

    #[test]
    fn test_unknown_method_has_no_body() {
        let mut headers = HeaderSession::new();
        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets", "trace", &operation(vec![pet_body()]))
            .unwrap();
        assert_eq!(item.request.method, "TRACE");
        assert!(item.request.body.is_none());
    }
}

mod composition_tests {
    use super::*;

    #[test]
    fn test_item_url_and_headers() {
        let mut headers = HeaderSession::new();
        let op = operation(vec![
            Parameter::new("petId", ParameterLocation::Path)
                .required(true)
                .with_type("integer", Some("int64")),
            Parameter::new("api_key", ParameterLocation::Header),
        ]);
        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets/{petId}", "get", &op)
            .unwrap();

        assert_eq!(item.request.url.raw, "{{baseUrl}}/pets/:petId");
        assert_eq!(item.request.url.variable[0].value, "0");
        assert_eq!(item.request.header.len(), 3);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_description_prefers_summary() {
        let mut headers = HeaderSession::new();
        let mut op = operation(Vec::new());
        op.summary = Some("List pets".to_string());
        op.description = Some("Returns every pet".to_string());
        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets", "get", &op)
            .unwrap();
        assert_eq!(item.request.description.as_deref(), Some("List pets"));
    }

    #[test]
    fn test_test_script_becomes_event() {
        let mut headers = HeaderSession::new();
        let mut op = operation(Vec::new());
        let mut extensions = BTreeMap::new();
        let lines = [
            "pm.test(\"status\", function () {",
            "  pm.response.to.have.status(200);",
            "});",
        ];
        extensions.insert("x-postman-test".to_string(), json!(lines));
        op.extensions = extensions;

        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets", "get", &op)
            .unwrap();
        assert_eq!(item.event.len(), 1);
        assert_eq!(item.event[0].listen, "test");
        assert_eq!(item.event[0].script.exec.len(), 3);

        let serialized = serde_json::to_value(&item).unwrap();
        assert_eq!(serialized["event"][0]["script"]["type"], "text/javascript");
    }

    #[test]
    fn test_custom_script_extension() {
        let settings = ConversionSection {
            test_script_extension: "x-checks".to_string(),
            ..Default::default()
        };
        let mut op = operation(Vec::new());
        op.extensions.insert("x-checks".to_string(), json!("pm.expect(1).to.eql(1);"));
        op.extensions.insert("x-postman-test".to_string(), json!("ignored();"));

        let item = RequestItemBuilder::new(&settings)
            .build_item(&mut HeaderSession::new(), "/pets", "get", &op)
            .unwrap();
        assert_eq!(item.event[0].script.exec, vec!["pm.expect(1).to.eql(1);"]);
    }

    #[test]
    fn test_no_script_no_event() {
        let mut headers = HeaderSession::new();
        let op = operation(Vec::new());
        let item = RequestItemBuilder::default()
            .build_item(&mut headers, "/pets", "get", &op)
            .unwrap();
        assert!(item.event.is_empty());
        let serialized = serde_json::to_value(&item).unwrap();
        assert!(serialized.get("event").is_none());
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_depth_error_propagates() {
        let settings = ConversionSection {
            max_depth: 1,
            literal_coercion: LiteralCoercion::Permissive,
            ..Default::default()
        };
        let deep = Parameter::new("pet", ParameterLocation::Body)
            .required(true)
            .with_schema(SchemaNode::object([(
                "owner",
                SchemaNode::object([("id", SchemaNode::of_type("integer"))]),
            )]));
        let result = RequestItemBuilder::new(&settings).build_item(
            &mut HeaderSession::new(),
            "/pets",
            "post",
            &operation(vec![deep]),
        );
        assert!(matches!(result, Err(ConversionError::SchemaTooDeep { limit: 1 })));
    }

    #[test]
    fn test_failed_operation_still_records_headers() {
        let mut headers = HeaderSession::new();
        let op = operation(vec![
            Parameter::new("X-Api-Key", ParameterLocation::Header).with_default("k"),
            Parameter::new("node", ParameterLocation::Body)
                .required(true)
                .with_schema(SchemaNode::recursive("Node")),
        ]);
        let result = RequestItemBuilder::default().build_item(&mut headers, "/nodes", "post", &op);

        assert!(result.is_err());
        assert_eq!(
            headers.get("X-Api-Key").map(|h| h.value.as_str()),
            Some("k")
        );
    }
}
