//! Request body assembly
//!
//! Form parameters become a form-data body; a required body parameter becomes
//! a raw JSON example document built by the [`PropertyTreeBuilder`].

use serde_json::Value as JsonValue;

use super::ConversionError;
use super::properties::{PropertyTreeBuilder, to_pretty_json};
use super::value::{leaf_value, resolve_text};
use crate::models::{
    FormField, LiteralCoercion, Parameter, ParameterLocation, RequestBody, SchemaNode,
};

/// Assembles request bodies for body-bearing methods
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyAssembler {
    tree: PropertyTreeBuilder,
    coercion: LiteralCoercion,
}

impl BodyAssembler {
    pub fn new(tree: PropertyTreeBuilder, coercion: LiteralCoercion) -> Self {
        Self { tree, coercion }
    }

    /// Build the request body from an operation's parameters.
    ///
    /// Any form field selects form-data mode, even when a raw document was
    /// also produced. Otherwise the body is raw, possibly empty. When several
    /// required body parameters are declared the last one wins.
    pub fn assemble(&self, parameters: &[Parameter]) -> Result<RequestBody, ConversionError> {
        let mut formdata = Vec::new();
        let mut raw = String::new();

        for param in parameters {
            match param.location {
                ParameterLocation::FormData => {
                    let value = resolve_text(&param.default, &param.example, self.coercion);
                    formdata.push(FormField::text(&param.name, value, param.required));
                }
                ParameterLocation::Body if param.required => {
                    if let Some(schema) = &param.schema
                        && let Some(document) = self.raw_document(schema)?
                    {
                        raw = document;
                    }
                }
                _ => {}
            }
        }

        if !formdata.is_empty() {
            return Ok(RequestBody::Formdata { formdata });
        }
        Ok(RequestBody::Raw { raw })
    }

    /// Raw example for a body schema; `None` for primitive schemas
    fn raw_document(&self, schema: &SchemaNode) -> Result<Option<String>, ConversionError> {
        self.tree.ensure_expanded(schema)?;

        let mut document = None;

        if schema.is_object() {
            document = Some(self.tree.build(&schema.properties)?);
        }

        if schema.is_array() {
            let element = match schema.items.as_deref() {
                Some(items) => {
                    self.tree.ensure_expanded(items)?;
                    if items.is_object() {
                        self.tree.build_value(&items.properties)?
                    } else if items.is_array() {
                        self.tree.node_value(items)?
                    } else {
                        leaf_value(items)
                    }
                }
                None => leaf_value(&SchemaNode::default()),
            };
            document = Some(to_pretty_json(&JsonValue::Array(vec![element]))?);
        }

        Ok(document)
    }
}
