//! Swagger Collection SDK - Swagger 2.0 to Postman collection conversion
//!
//! Provides unified interfaces for:
//! - Importing Swagger 2.0 documents (JSON or YAML)
//! - Synthesizing example request bodies from schemas
//! - Building Postman collection v2.1 items (URL, headers, body, test scripts)
//! - Exporting collections as JSON
//! - Converter configuration (`.swagger-collection.toml` plus environment overrides)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod models;

// Re-export commonly used types
pub use config::{ConfigError, ConverterConfig};
pub use convert::{
    BodyAssembler, CollectionConverter, ConversionError, ConversionOutcome, HeaderSession,
    PropertyTreeBuilder, RequestItemBuilder, SkippedOperation,
};
pub use export::{CollectionExporter, ExportError, ExportResult};
pub use import::{ImportError, SwaggerImporter};

// Re-export models
pub use models::{ApiDocument, Collection, Literal, LiteralCoercion, Parameter, SchemaNode};
