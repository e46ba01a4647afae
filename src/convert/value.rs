//! Example value synthesis
//!
//! Maps a primitive type and format to a representative scalar. The mapping is
//! total: unknown combinations yield [`FALLBACK_TEXT`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value as JsonValue;

use crate::models::{Literal, LiteralCoercion, Parameter, SchemaNode, SchemaTypes};

/// Value used when nothing better is known
pub const FALLBACK_TEXT: &str = "string";

/// Synthesize a scalar for a type/format pair
///
/// # Example
///
/// ```rust
/// use swagger_collection_sdk::convert::synthesize;
/// use serde_json::json;
///
/// assert_eq!(synthesize("integer", Some("int64")), json!(0));
/// assert_eq!(synthesize("string", Some("date")), json!("1970-01-01"));
/// assert_eq!(synthesize("file", None), json!("string"));
/// ```
pub fn synthesize(kind: &str, format: Option<&str>) -> JsonValue {
    match (kind, format) {
        ("boolean", _) => JsonValue::Bool(true),
        ("integer", _) => JsonValue::from(0),
        ("number", _) => JsonValue::from(0.0),
        ("string", Some("date")) => JsonValue::from("1970-01-01"),
        ("string", Some("date-time")) => JsonValue::from("1970-01-01T00:00:00Z"),
        ("string", Some("uuid")) => JsonValue::from("00000000-0000-0000-0000-000000000000"),
        ("string", Some("email")) => JsonValue::from("user@example.com"),
        ("string", Some("uri")) | ("string", Some("url")) => JsonValue::from("https://example.com"),
        ("string", Some("hostname")) => JsonValue::from("example.com"),
        ("string", Some("ipv4")) => JsonValue::from("127.0.0.1"),
        ("string", Some("ipv6")) => JsonValue::from("::1"),
        ("string", Some("byte")) => JsonValue::from(STANDARD.encode(FALLBACK_TEXT)),
        ("string", Some("password")) => JsonValue::from("password"),
        _ => JsonValue::from(FALLBACK_TEXT),
    }
}

/// Synthesize a scalar for a declared type set, using its primary type
pub fn synthesize_types(types: &SchemaTypes, format: Option<&str>) -> JsonValue {
    match types.primary() {
        Some(kind) => synthesize(kind, format),
        None => JsonValue::from(FALLBACK_TEXT),
    }
}

/// Example value of a primitive schema: default, then example, then synthesized
pub fn leaf_value(node: &SchemaNode) -> JsonValue {
    node.default
        .to_json()
        .or_else(|| node.example.to_json())
        .unwrap_or_else(|| synthesize_types(&node.types, node.format.as_deref()))
}

/// Text value for header and form parameters: default, then example, then
/// [`FALLBACK_TEXT`]
pub fn resolve_text(default: &Literal, example: &Literal, coercion: LiteralCoercion) -> String {
    if default.is_declared() {
        default.as_text(coercion)
    } else if example.is_declared() {
        example.as_text(coercion)
    } else {
        FALLBACK_TEXT.to_string()
    }
}

/// Text value for query and path parameters.
///
/// Like [`resolve_text`], but an undeclared value is synthesized from the
/// parameter's type and format.
pub fn parameter_text(param: &Parameter, coercion: LiteralCoercion) -> String {
    if param.default.is_declared() || param.example.is_declared() {
        return resolve_text(&param.default, &param.example, coercion);
    }
    let kind = param.param_type.as_deref().unwrap_or(FALLBACK_TEXT);
    match synthesize(kind, param.format.as_deref()) {
        JsonValue::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterLocation;
    use serde_json::json;

    #[test]
    fn test_byte_format_is_base64() {
        assert_eq!(synthesize("string", Some("byte")), json!("c3RyaW5n"));
    }

    #[test]
    fn test_synthesize_types_empty_set_falls_back() {
        assert_eq!(
            synthesize_types(&SchemaTypes::default(), Some("int32")),
            json!("string")
        );
        assert_eq!(
            synthesize_types(&SchemaTypes::new(["null", "integer"]), None),
            json!(0)
        );
    }

    #[test]
    fn test_leaf_value_prefers_default_then_example() {
        let node = SchemaNode::of_type("integer")
            .with_default(5_i64)
            .with_example(9_i64);
        assert_eq!(leaf_value(&node), json!(5));

        let node = SchemaNode::of_type("string").with_example("Rex");
        assert_eq!(leaf_value(&node), json!("Rex"));

        let node = SchemaNode::of_type("string").with_format("uuid");
        assert_eq!(
            leaf_value(&node),
            json!("00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn test_resolve_text_precedence() {
        let permissive = LiteralCoercion::Permissive;
        assert_eq!(
            resolve_text(&Literal::from("a"), &Literal::from("b"), permissive),
            "a"
        );
        assert_eq!(
            resolve_text(&Literal::Unset, &Literal::from("b"), permissive),
            "b"
        );
        assert_eq!(
            resolve_text(&Literal::Null, &Literal::Unset, permissive),
            "string"
        );
        // A declared non-string default wins precedence and is discarded
        assert_eq!(
            resolve_text(&Literal::from(1_i64), &Literal::from("b"), permissive),
            ""
        );
    }

    #[test]
    fn test_parameter_text_synthesizes_from_type() {
        let coercion = LiteralCoercion::Permissive;
        let param = Parameter::new("limit", ParameterLocation::Query).with_type("integer", None);
        assert_eq!(parameter_text(&param, coercion), "0");

        let param =
            Parameter::new("since", ParameterLocation::Query).with_type("string", Some("date"));
        assert_eq!(parameter_text(&param, coercion), "1970-01-01");

        let param = Parameter::new("q", ParameterLocation::Query).with_example("dogs");
        assert_eq!(parameter_text(&param, coercion), "dogs");
    }
}
