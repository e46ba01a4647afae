//! Postman collection exporter

use std::path::Path;
use tracing::info;

use super::{ExportError, ExportResult};
use crate::models::Collection;

/// Format identifier of exported collections
pub const COLLECTION_FORMAT: &str = "postman_collection_v2.1";

/// Exporter for Postman collection v2.1 JSON
#[derive(Debug, Default)]
pub struct CollectionExporter;

impl CollectionExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a collection as pretty-printed JSON.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swagger_collection_sdk::export::CollectionExporter;
    /// use swagger_collection_sdk::models::{Collection, CollectionInfo, POSTMAN_SCHEMA_V2_1};
    ///
    /// let collection = Collection {
    ///     info: CollectionInfo {
    ///         postman_id: "id".to_string(),
    ///         name: "Pets".to_string(),
    ///         description: None,
    ///         schema: POSTMAN_SCHEMA_V2_1.to_string(),
    ///     },
    ///     item: Vec::new(),
    ///     variable: Vec::new(),
    /// };
    /// let result = CollectionExporter::new().export(&collection).unwrap();
    /// assert_eq!(result.format, "postman_collection_v2.1");
    /// assert!(result.content.contains("\"name\": \"Pets\""));
    /// ```
    pub fn export(&self, collection: &Collection) -> Result<ExportResult, ExportError> {
        let content = serde_json::to_string_pretty(collection)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: COLLECTION_FORMAT.to_string(),
        })
    }

    /// Export a collection and write it to `path`, creating parent
    /// directories as needed
    pub fn export_to_file(
        &self,
        collection: &Collection,
        path: &Path,
    ) -> Result<ExportResult, ExportError> {
        let result = self.export(collection)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExportError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, &result.content).map_err(|e| {
            ExportError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(
            "Wrote collection '{}' with {} items to {}",
            collection.info.name,
            collection.item.len(),
            path.display()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionInfo, POSTMAN_SCHEMA_V2_1, Variable};
    use tempfile::tempdir;

    fn collection() -> Collection {
        Collection {
            info: CollectionInfo {
                postman_id: "0000".to_string(),
                name: "Pets".to_string(),
                description: Some("Pet store".to_string()),
                schema: POSTMAN_SCHEMA_V2_1.to_string(),
            },
            item: Vec::new(),
            variable: vec![Variable {
                key: "baseUrl".to_string(),
                value: "https://pets.example.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_export_document_shape() {
        let result = CollectionExporter::new().export(&collection()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.content).unwrap();

        assert_eq!(json["info"]["_postman_id"], "0000");
        assert_eq!(json["info"]["schema"], POSTMAN_SCHEMA_V2_1);
        assert_eq!(json["variable"][0]["key"], "baseUrl");
        assert!(json["item"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_export_to_file_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("pets.postman_collection.json");

        let result = CollectionExporter::new()
            .export_to_file(&collection(), &path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, result.content);
    }
}
