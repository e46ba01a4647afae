//! Swagger 2.0 model structures
//!
//! In-memory form of an imported API description: paths, operations and their
//! parameters. Produced by [`crate::import::SwaggerImporter`] and consumed by
//! the collection converter.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::schema::{Literal, SchemaNode};

/// HTTP method of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// All methods in the order operations are emitted for a path
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// Lower-case key used in a Swagger path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// Whether requests with this method conventionally carry a body
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown HTTP method: {}", s))
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Where a parameter is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Header,
    FormData,
    Body,
    Query,
    Path,
}

impl std::str::FromStr for ParameterLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(ParameterLocation::Header),
            "formData" => Ok(ParameterLocation::FormData),
            "body" => Ok(ParameterLocation::Body),
            "query" => Ok(ParameterLocation::Query),
            "path" => Ok(ParameterLocation::Path),
            _ => Err(format!("Unknown parameter location: {}", s)),
        }
    }
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Payload schema (body parameters only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
    /// Scalar type of non-body parameters
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Literal::is_unset")]
    pub default: Literal,
    #[serde(default, skip_serializing_if = "Literal::is_unset")]
    pub example: Literal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// Create an optional parameter with no schema or declared values
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Parameter {
            name: name.into(),
            location,
            required: false,
            schema: None,
            param_type: None,
            format: None,
            default: Literal::Unset,
            example: Literal::Unset,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_schema(mut self, schema: SchemaNode) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_type(mut self, param_type: &str, format: Option<&str>) -> Self {
        self.param_type = Some(param_type.to_string());
        self.format = format.map(|f| f.to_string());
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
}

/// A single API operation (one method on one path)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Content-type hints
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Accept hints
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Vendor extensions (`x-*`), keys lower-cased
    #[serde(default)]
    pub extensions: BTreeMap<String, JsonValue>,
}

/// Operations declared under one path template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Path template (e.g., `/pets/{petId}`)
    pub path: String,
    pub operations: Vec<(HttpMethod, Operation)>,
}

/// API info block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Imported Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    pub info: ApiInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    /// Paths sorted by template
    #[serde(default)]
    pub paths: Vec<PathItem>,
}

impl ApiDocument {
    /// Base URL derived from `schemes`, `host` and `basePath`.
    ///
    /// Returns `None` when the document declares no host.
    pub fn base_url(&self) -> Option<String> {
        let host = self.host.as_deref()?.trim_end_matches('/');
        let scheme = self
            .schemes
            .iter()
            .find(|s| s.as_str() == "https")
            .or_else(|| self.schemes.first())
            .map(String::as_str)
            .unwrap_or("https");
        let base_path = self
            .base_path
            .as_deref()
            .map(|p| p.trim_end_matches('/'))
            .unwrap_or("");
        let base_path = if base_path.is_empty() || base_path.starts_with('/') {
            base_path.to_string()
        } else {
            format!("/{}", base_path)
        };
        Some(format!("{}://{}{}", scheme, host, base_path))
    }

    /// Total number of operations across all paths
    pub fn operation_count(&self) -> usize {
        self.paths.iter().map(|p| p.operations.len()).sum()
    }
}
