//! Schema model for the SDK
//!
//! A `SchemaNode` is the typed, possibly nested description of a value that
//! the example synthesizer walks. Declared `default`/`example` values are kept
//! as explicit [`Literal`] variants instead of loosely typed JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// How non-string literals are rendered where a text value is required
/// (header values, form fields, query strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralCoercion {
    /// Numbers and booleans are discarded and rendered as an empty string
    #[default]
    Permissive,
    /// Numbers and booleans are rendered as their JSON text
    Stringify,
}

impl std::str::FromStr for LiteralCoercion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissive" => Ok(LiteralCoercion::Permissive),
            "stringify" => Ok(LiteralCoercion::Stringify),
            _ => Err(format!(
                "Unknown literal coercion: {}. Use 'permissive' or 'stringify'.",
                s
            )),
        }
    }
}

/// A declared default or example value.
///
/// Only scalar values are representable. Structured JSON (arrays, objects)
/// maps to `Unset`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Explicit JSON `null`
    Null,
    /// Nothing declared
    #[default]
    Unset,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Literal {
    /// Build a literal from an optional JSON value.
    pub fn from_json(value: Option<&JsonValue>) -> Self {
        match value {
            None => Literal::Unset,
            Some(JsonValue::Null) => Literal::Null,
            Some(JsonValue::Bool(b)) => Literal::Bool(*b),
            Some(JsonValue::Number(n)) => Literal::Number(n.clone()),
            Some(JsonValue::String(s)) => Literal::String(s.clone()),
            Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => Literal::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Literal::Unset)
    }

    /// Whether the literal takes part in default/example precedence.
    ///
    /// `Null` is treated like `Unset`.
    pub fn is_declared(&self) -> bool {
        !matches!(self, Literal::Unset | Literal::Null)
    }

    /// Render the literal as text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swagger_collection_sdk::models::{Literal, LiteralCoercion};
    ///
    /// let literal = Literal::from(42_i64);
    /// assert_eq!(literal.as_text(LiteralCoercion::Permissive), "");
    /// assert_eq!(literal.as_text(LiteralCoercion::Stringify), "42");
    /// ```
    pub fn as_text(&self, coercion: LiteralCoercion) -> String {
        match (self, coercion) {
            (Literal::String(s), _) => s.clone(),
            (Literal::Number(n), LiteralCoercion::Stringify) => n.to_string(),
            (Literal::Bool(b), LiteralCoercion::Stringify) => b.to_string(),
            (Literal::Number(_), LiteralCoercion::Permissive)
            | (Literal::Bool(_), LiteralCoercion::Permissive)
            | (Literal::Null, _)
            | (Literal::Unset, _) => String::new(),
        }
    }

    /// The literal as a JSON value, if declared.
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            Literal::Unset | Literal::Null => None,
            Literal::Bool(b) => Some(JsonValue::Bool(*b)),
            Literal::Number(n) => Some(JsonValue::Number(n.clone())),
            Literal::String(s) => Some(JsonValue::String(s.clone())),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

/// Declared type set of a schema (`type: "string"` or `type: ["string", "null"]`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaTypes(Vec<String>);

impl SchemaTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaTypes(types.into_iter().map(Into::into).collect())
    }

    /// Whether the set declares `kind`
    pub fn contains(&self, kind: &str) -> bool {
        self.0.iter().any(|t| t == kind)
    }

    /// First declared type other than `null`
    pub fn primary(&self) -> Option<&str> {
        self.0.iter().map(String::as_str).find(|t| *t != "null")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Schema node: a typed description of an expected value
///
/// Objects carry named `properties`, arrays carry a single `items` schema.
/// Properties are kept sorted so generated examples are reproducible.
///
/// # Example
///
/// ```rust
/// use swagger_collection_sdk::models::SchemaNode;
///
/// let pet = SchemaNode::object([
///     ("id", SchemaNode::of_type("integer").with_format("int64")),
///     ("name", SchemaNode::of_type("string")),
/// ]);
/// assert!(pet.types.contains("object"));
/// assert_eq!(pet.properties.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Declared type set
    #[serde(default, rename = "type")]
    pub types: SchemaTypes,
    /// Type format (e.g., "int64", "date-time", "uuid")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Declared default value
    #[serde(default, skip_serializing_if = "Literal::is_unset")]
    pub default: Literal,
    /// Declared example value
    #[serde(default, skip_serializing_if = "Literal::is_unset")]
    pub example: Literal,
    /// Named child schemas (objects)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaNode>,
    /// Item schema (arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of a definition that refers back into itself at this point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursive_ref: Option<String>,
    /// Expansion stopped here because the schema exceeded the import limits
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl SchemaNode {
    /// Create a schema with a single declared type
    pub fn of_type(kind: &str) -> Self {
        SchemaNode {
            types: SchemaTypes::new([kind]),
            ..Default::default()
        }
    }

    /// Create an object schema from `(name, schema)` pairs
    pub fn object<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        SchemaNode {
            types: SchemaTypes::new(["object"]),
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
            ..Default::default()
        }
    }

    /// Create an array schema with the given item schema
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode {
            types: SchemaTypes::new(["array"]),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// Placeholder for a definition that refers back to itself
    pub fn recursive(reference: impl Into<String>) -> Self {
        SchemaNode {
            recursive_ref: Some(reference.into()),
            ..Default::default()
        }
    }

    /// Placeholder for a schema that was not expanded because it lies beyond
    /// the importer's depth or size limits
    pub fn truncated() -> Self {
        SchemaNode {
            truncated: true,
            ..Default::default()
        }
    }

    /// Whether this node stands in for a schema that was never expanded
    pub fn is_placeholder(&self) -> bool {
        self.truncated || self.recursive_ref.is_some()
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_default(mut self, default: impl Into<Literal>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<Literal>) -> Self {
        self.example = example.into();
        self
    }

    pub fn is_object(&self) -> bool {
        self.types.contains("object")
    }

    pub fn is_array(&self) -> bool {
        self.types.contains("array")
    }
}
