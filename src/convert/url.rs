//! Request URL construction
//!
//! Every URL is relative to the `{{baseUrl}}` collection variable. Swagger
//! path placeholders (`{petId}`) become Postman path variables (`:petId`).

use once_cell::sync::Lazy;
use regex::Regex;
use urlencoding::encode;

use super::value::parameter_text;
use crate::models::{
    BASE_URL_VARIABLE, LiteralCoercion, Parameter, ParameterLocation, PathVariable, QueryParam, Url,
};

static RE_PATH_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}/]+)\}").expect("Invalid regex"));

/// Convert `{name}` placeholders to `:name`
pub fn to_postman_path(template: &str) -> String {
    RE_PATH_PLACEHOLDER
        .replace_all(template, ":$1")
        .into_owned()
}

/// Build the request URL for a path template and the operation's parameters
///
/// # Example
///
/// ```rust
/// use swagger_collection_sdk::convert::build_url;
/// use swagger_collection_sdk::models::{LiteralCoercion, Parameter, ParameterLocation};
///
/// let params = vec![Parameter::new("petId", ParameterLocation::Path).required(true)];
/// let url = build_url("/pets/{petId}", &params, LiteralCoercion::Permissive);
/// assert_eq!(url.raw, "{{baseUrl}}/pets/:petId");
/// assert_eq!(url.path, vec!["pets", ":petId"]);
/// ```
pub fn build_url(template: &str, parameters: &[Parameter], coercion: LiteralCoercion) -> Url {
    let path = to_postman_path(template);
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .collect();

    let query: Vec<QueryParam> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
        .map(|p| QueryParam {
            key: p.name.clone(),
            value: parameter_text(p, coercion),
            disabled: !p.required,
        })
        .collect();

    let variable: Vec<PathVariable> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
        .map(|p| PathVariable {
            key: p.name.clone(),
            value: parameter_text(p, coercion),
            description: p.description.clone(),
        })
        .collect();

    let mut raw = format!("{{{{{}}}}}/{}", BASE_URL_VARIABLE, segments.join("/"));
    let enabled_query: Vec<String> = query
        .iter()
        .filter(|q| !q.disabled)
        .map(|q| format!("{}={}", encode(&q.key), encode(&q.value)))
        .collect();
    if !enabled_query.is_empty() {
        raw.push('?');
        raw.push_str(&enabled_query.join("&"));
    }

    Url {
        raw,
        host: vec![format!("{{{{{}}}}}", BASE_URL_VARIABLE)],
        path: segments,
        query,
        variable,
    }
}
