//! Header collection
//!
//! Headers accumulate in a [`HeaderSession`] for the lifetime of a conversion:
//! a header declared by one operation is still emitted for every operation
//! converted after it, unless a later operation overwrites the same key.

use std::collections::BTreeMap;

use super::value::resolve_text;
use crate::models::{Header, LiteralCoercion, Parameter, ParameterLocation};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ACCEPT_HEADER: &str = "Accept";

/// Session-wide header mapping keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSession {
    entries: BTreeMap<String, Header>,
}

impl HeaderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `key`
    pub fn upsert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), Header::new(key, value));
    }

    pub fn get(&self, key: &str) -> Option<&Header> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every header collected so far. Callers must not rely on the order.
    pub fn headers(&self) -> Vec<Header> {
        self.entries.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record the headers of one operation and return the session's full
    /// header list.
    ///
    /// # Arguments
    ///
    /// * `content_types` - Content-type hints (`consumes`); the first one is used.
    /// * `accepts` - Accept hints (`produces`); the first one is used.
    /// * `parameters` - Operation parameters; only header parameters are read.
    /// * `coercion` - How non-string header defaults are rendered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swagger_collection_sdk::convert::HeaderSession;
    /// use swagger_collection_sdk::models::LiteralCoercion;
    ///
    /// let mut session = HeaderSession::new();
    /// let json = vec!["application/json".to_string()];
    /// let headers = session.collect(&json, &json, &[], LiteralCoercion::Permissive);
    /// assert_eq!(headers.len(), 2);
    /// ```
    pub fn collect(
        &mut self,
        content_types: &[String],
        accepts: &[String],
        parameters: &[Parameter],
        coercion: LiteralCoercion,
    ) -> Vec<Header> {
        if let Some(content_type) = first_hint(content_types) {
            self.upsert(CONTENT_TYPE_HEADER, content_type);
        }
        if let Some(accept) = first_hint(accepts) {
            self.upsert(ACCEPT_HEADER, accept);
        }

        for param in parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Header)
        {
            let value = resolve_text(&param.default, &param.example, coercion);
            self.upsert(&param.name, &value);
        }

        self.headers()
    }
}

/// First hint, trimmed, if it is not blank
fn first_hint(hints: &[String]) -> Option<&str> {
    hints
        .first()
        .map(|hint| hint.trim())
        .filter(|hint| !hint.is_empty())
}
