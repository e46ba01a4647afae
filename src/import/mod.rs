//! Import functionality
//!
//! Provides the parser that loads Swagger 2.0 API descriptions (JSON or YAML)
//! into the in-memory [`crate::models::ApiDocument`].

pub mod swagger;

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("IO error: {0}")]
    IoError(String),
}

pub use swagger::SwaggerImporter;
