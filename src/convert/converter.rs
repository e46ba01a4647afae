//! Swagger document to Postman collection converter
//!
//! A [`CollectionConverter`] is one conversion session: it owns the
//! configuration and the header mapping shared by every operation it
//! converts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ConversionError;
use super::headers::HeaderSession;
use super::item::RequestItemBuilder;
use crate::config::ConverterConfig;
use crate::models::{
    ApiDocument, BASE_URL_VARIABLE, Collection, CollectionInfo, Item, Operation,
    POSTMAN_SCHEMA_V2_1, Variable,
};

/// An operation left out of the collection because it failed to convert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOperation {
    pub method: String,
    pub path: String,
    pub reason: String,
}

/// Result of converting a whole document
#[derive(Debug, Clone)]
#[must_use = "conversion outcomes carry the collection and any skipped operations"]
pub struct ConversionOutcome {
    pub collection: Collection,
    pub skipped: Vec<SkippedOperation>,
}

/// Conversion session
///
/// # Example
///
/// ```rust
/// use swagger_collection_sdk::config::ConverterConfig;
/// use swagger_collection_sdk::convert::CollectionConverter;
/// use swagger_collection_sdk::models::{Operation, Parameter, ParameterLocation};
///
/// let mut converter = CollectionConverter::new(ConverterConfig::default());
/// let operation = Operation {
///     parameters: vec![Parameter::new("file", ParameterLocation::FormData).required(true)],
///     ..Default::default()
/// };
/// let item = converter.build_item("/upload", "post", &operation).unwrap();
/// assert_eq!(item.request.method, "POST");
/// ```
#[derive(Debug)]
pub struct CollectionConverter {
    config: ConverterConfig,
    items: RequestItemBuilder,
    headers: HeaderSession,
}

impl Default for CollectionConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl CollectionConverter {
    /// Start a new session with an empty header mapping
    pub fn new(config: ConverterConfig) -> Self {
        let items = RequestItemBuilder::new(&config.conversion);
        Self {
            config,
            items,
            headers: HeaderSession::new(),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Headers accumulated so far in this session
    pub fn header_session(&self) -> &HeaderSession {
        &self.headers
    }

    /// Convert one operation against the session header mapping
    pub fn build_item(
        &mut self,
        url: &str,
        method: &str,
        operation: &Operation,
    ) -> Result<Item, ConversionError> {
        self.items.build_item(&mut self.headers, url, method, operation)
    }

    /// Convert every operation of a document into one collection.
    ///
    /// Operations are converted in path order, then in method order. A
    /// failing operation aborts the conversion unless
    /// `skip_failed_operations` is set, in which case it is reported in
    /// [`ConversionOutcome::skipped`].
    pub fn convert(
        &mut self,
        document: &ApiDocument,
    ) -> Result<ConversionOutcome, ConversionError> {
        let mut items = Vec::new();
        let mut skipped = Vec::new();

        for path_item in &document.paths {
            for (method, operation) in &path_item.operations {
                debug!("Converting {} {}", method, path_item.path);
                match self.build_item(&path_item.path, method.as_str(), operation) {
                    Ok(item) => items.push(item),
                    Err(e) if self.config.conversion.skip_failed_operations => {
                        warn!("Skipping {} {}: {}", method, path_item.path, e);
                        skipped.push(SkippedOperation {
                            method: method.to_string(),
                            path: path_item.path.clone(),
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => {
                        return Err(ConversionError::Operation {
                            method: method.to_string(),
                            path: path_item.path.clone(),
                            source: Box::new(e),
                        });
                    }
                }
            }
        }

        info!(
            "Converted {} operations into collection items ({} skipped)",
            items.len(),
            skipped.len()
        );

        Ok(ConversionOutcome {
            collection: Collection {
                info: self.collection_info(document),
                item: items,
                variable: vec![Variable {
                    key: BASE_URL_VARIABLE.to_string(),
                    value: self.base_url(document),
                }],
            },
            skipped,
        })
    }

    fn collection_info(&self, document: &ApiDocument) -> CollectionInfo {
        let name = self
            .config
            .collection
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| document.info.title.clone());
        let seed = format!("{}@{}", name, document.info.version);
        CollectionInfo {
            postman_id: Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes()).to_string(),
            name,
            description: document.info.description.clone(),
            schema: POSTMAN_SCHEMA_V2_1.to_string(),
        }
    }

    fn base_url(&self, document: &ApiDocument) -> String {
        self.config
            .collection
            .base_url
            .clone()
            .or_else(|| document.base_url())
            .unwrap_or_default()
    }
}
