//! Postman collection model structures
//!
//! Mirrors the parts of the Postman collection v2.1 format produced by the
//! converter: items, requests, headers, bodies and test events.

use serde::{Deserialize, Serialize};

/// JSON schema URL of the Postman collection v2.1 format
pub const POSTMAN_SCHEMA_V2_1: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Collection variable holding the API base URL
pub const BASE_URL_VARIABLE: &str = "baseUrl";

/// Request header entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Form-data field
///
/// Postman stores the inverse flag (`disabled`), so `enabled` is inverted on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
    #[serde(rename = "disabled", with = "inverted")]
    pub enabled: bool,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FormField {
    /// Create a text form field
    pub fn text(key: impl Into<String>, value: impl Into<String>, enabled: bool) -> Self {
        FormField {
            key: key.into(),
            value: value.into(),
            enabled,
            field_type: "text".to_string(),
        }
    }
}

mod inverted {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(!*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(!bool::deserialize(deserializer)?)
    }
}

/// Body mode tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Formdata,
    Raw,
}

/// Request body: either a list of form fields or a raw document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestBody {
    Formdata { formdata: Vec<FormField> },
    Raw { raw: String },
}

impl RequestBody {
    pub fn mode(&self) -> BodyMode {
        match self {
            RequestBody::Formdata { .. } => BodyMode::Formdata,
            RequestBody::Raw { .. } => BodyMode::Raw,
        }
    }

    /// Raw document, if this is a raw body
    pub fn raw(&self) -> Option<&str> {
        match self {
            RequestBody::Raw { raw } => Some(raw),
            RequestBody::Formdata { .. } => None,
        }
    }

    /// Form fields, empty for a raw body
    pub fn form_fields(&self) -> &[FormField] {
        match self {
            RequestBody::Formdata { formdata } => formdata,
            RequestBody::Raw { .. } => &[],
        }
    }
}

/// Query string entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Path variable (`:name` segment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathVariable {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<PathVariable>,
}

/// Script attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

impl Script {
    pub fn javascript(exec: Vec<String>) -> Self {
        Script {
            script_type: "text/javascript".to_string(),
            exec,
        }
    }
}

/// Item event (`test` runs after the response arrives)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

impl Event {
    pub fn test(script: Script) -> Self {
        Event {
            listen: "test".to_string(),
            script,
        }
    }
}

/// Request part of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: Url,
    pub header: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Collection item: one request plus its events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub request: Request,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
}

/// Collection variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

/// Collection info block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: String,
}

/// Postman collection v2.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    pub item: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_field_serializes_disabled_flag() {
        let field = FormField::text("file", "string", false);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({"key": "file", "value": "string", "disabled": true, "type": "text"})
        );

        let parsed: FormField = serde_json::from_value(value).unwrap();
        assert!(!parsed.enabled);
    }

    #[test]
    fn test_request_body_mode_tag() {
        let body = RequestBody::Raw {
            raw: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"mode": "raw", "raw": "{}"})
        );

        let body = RequestBody::Formdata {
            formdata: vec![FormField::text("a", "b", true)],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["mode"], "formdata");
        assert_eq!(value["formdata"][0]["disabled"], false);
    }

    #[test]
    fn test_request_body_accessors() {
        let raw = RequestBody::Raw {
            raw: String::new(),
        };
        assert_eq!(raw.mode(), BodyMode::Raw);
        assert_eq!(raw.raw(), Some(""));
        assert!(raw.form_fields().is_empty());
    }
}
