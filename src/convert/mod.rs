//! Swagger to Postman conversion module
//!
//! Provides the example-value synthesis engine and the builders that turn one
//! Swagger operation into one Postman collection item:
//! - Value synthesis for primitive types
//! - Property tree (example document) building
//! - Header collection against a session-wide mapping
//! - Body assembly (form-data or raw JSON)
//! - Request item building

pub mod body;
pub mod converter;
pub mod headers;
pub mod item;
pub mod properties;
pub mod script;
pub mod url;
pub mod value;

pub use body::BodyAssembler;
pub use converter::{CollectionConverter, ConversionOutcome, SkippedOperation};
pub use headers::HeaderSession;
pub use item::RequestItemBuilder;
pub use properties::{PropertyTreeBuilder, to_pretty_json};
pub use script::extract_test_script;
pub use url::build_url;
pub use value::{FALLBACK_TEXT, leaf_value, parameter_text, resolve_text, synthesize};

/// Error during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Schema nesting exceeds the depth limit of {limit}")]
    SchemaTooDeep { limit: usize },
    #[error("Cyclic schema reference: {0}")]
    CyclicSchema(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Failed to convert {method} {path}: {source}")]
    Operation {
        method: String,
        path: String,
        #[source]
        source: Box<ConversionError>,
    },
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::Serialization(err.to_string())
    }
}
