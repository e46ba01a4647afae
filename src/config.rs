//! Converter configuration file support
//!
//! Handles parsing of `.swagger-collection.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::convert::properties::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::convert::script::DEFAULT_TEST_SCRIPT_EXTENSION;
use crate::models::LiteralCoercion;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".swagger-collection.toml";

/// Environment variable for the example nesting limit
pub const ENV_MAX_DEPTH: &str = "SWAGGER_COLLECTION_MAX_DEPTH";

/// Environment variable for the collection base URL
pub const ENV_BASE_URL: &str = "SWAGGER_COLLECTION_BASE_URL";

/// Environment variable for skipping operations that fail to convert
pub const ENV_SKIP_FAILED: &str = "SWAGGER_COLLECTION_SKIP_FAILED";

/// Error type for configuration handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Conversion behaviour section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSection {
    /// Maximum nesting of generated example documents
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// How non-string defaults/examples are rendered as text
    #[serde(default)]
    pub literal_coercion: LiteralCoercion,

    /// Skip operations that fail to convert instead of aborting
    #[serde(default)]
    pub skip_failed_operations: bool,

    /// Vendor extension holding an operation's test script
    #[serde(default = "default_test_script_extension")]
    pub test_script_extension: String,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_test_script_extension() -> String {
    DEFAULT_TEST_SCRIPT_EXTENSION.to_string()
}

impl Default for ConversionSection {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            literal_coercion: LiteralCoercion::default(),
            skip_failed_operations: false,
            test_script_extension: default_test_script_extension(),
        }
    }
}

/// Output collection section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CollectionSection {
    /// Collection name (defaults to the API title)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Value of the `baseUrl` variable (defaults to the document's host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Main configuration structure
///
/// Represents the `.swagger-collection.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConverterConfig {
    #[serde(default)]
    pub conversion: ConversionSection,

    #[serde(default)]
    pub collection: CollectionSection,
}

impl ConverterConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file, then apply environment overrides.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            debug!("Loaded configuration from {}", path.display());
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`.
    ///
    /// Values that do not parse are logged and ignored. Returns the names of
    /// the rejected variables.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(depth) = lookup(ENV_MAX_DEPTH) {
            match depth.trim().parse() {
                Ok(depth) => self.conversion.max_depth = depth,
                Err(_) => {
                    warn!(
                        "Ignoring {}={:?}: expected a positive integer",
                        ENV_MAX_DEPTH, depth
                    );
                    rejected.push(ENV_MAX_DEPTH);
                }
            }
        }

        if let Some(url) = lookup(ENV_BASE_URL) {
            self.collection.base_url = Some(url);
        }

        if let Some(skip) = lookup(ENV_SKIP_FAILED) {
            match parse_flag(&skip) {
                Some(skip) => self.conversion.skip_failed_operations = skip,
                None => {
                    warn!(
                        "Ignoring {}={:?}: expected true or false",
                        ENV_SKIP_FAILED, skip
                    );
                    rejected.push(ENV_SKIP_FAILED);
                }
            }
        }

        rejected
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion.max_depth == 0 {
            return Err(ConfigError::InvalidValue(
                "conversion.max_depth must be at least 1".to_string(),
            ));
        }
        if self.conversion.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidValue(format!(
                "conversion.max_depth must be at most {}, got {}",
                MAX_DEPTH_LIMIT, self.conversion.max_depth
            )));
        }
        if !self.conversion.test_script_extension.starts_with("x-") {
            return Err(ConfigError::InvalidValue(format!(
                "conversion.test_script_extension must start with 'x-', got '{}'",
                self.conversion.test_script_extension
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Swagger collection converter configuration

[conversion]
# Maximum nesting of generated example documents. Deeper (or self-referencing)
# schemas fail the operation instead of recursing forever. At most 256.
max_depth = 32

# How non-string defaults/examples of header, form and query parameters are
# rendered: "permissive" (dropped to an empty string) or "stringify"
literal_coercion = "permissive"

# Skip operations that fail to convert instead of aborting the whole run
skip_failed_operations = false

# Vendor extension holding an operation's test script
test_script_extension = "x-postman-test"

[collection]
# Collection name (defaults to info.title)
# name = "Petstore"

# Value of the {{baseUrl}} variable (defaults to schemes/host/basePath)
# base_url = "https://petstore.example.com/v2"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::new();
        assert_eq!(config.conversion.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(
            config.conversion.literal_coercion,
            LiteralCoercion::Permissive
        );
        assert!(!config.conversion.skip_failed_operations);
        assert_eq!(config.conversion.test_script_extension, "x-postman-test");
        assert!(config.collection.name.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[conversion]
max_depth = 8
literal_coercion = "stringify"
skip_failed_operations = true

[collection]
name = "Pets"
base_url = "http://localhost:8080"
"#;
        let config = ConverterConfig::parse(toml).unwrap();
        assert_eq!(config.conversion.max_depth, 8);
        assert_eq!(
            config.conversion.literal_coercion,
            LiteralCoercion::Stringify
        );
        assert!(config.conversion.skip_failed_operations);
        assert_eq!(config.collection.name.as_deref(), Some("Pets"));
        assert_eq!(
            config.collection.base_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_parse_rejects_zero_depth() {
        let result = ConverterConfig::parse("[conversion]\nmax_depth = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_parse_rejects_excessive_depth() {
        let result = ConverterConfig::parse("[conversion]\nmax_depth = 100000\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_overrides_accept_numeric_flag() {
        let mut config = ConverterConfig::new();
        let rejected = config.apply_overrides_from(|key| match key {
            ENV_SKIP_FAILED => Some("1".to_string()),
            ENV_MAX_DEPTH => Some(" 12 ".to_string()),
            _ => None,
        });

        assert!(rejected.is_empty());
        assert!(config.conversion.skip_failed_operations);
        assert_eq!(config.conversion.max_depth, 12);
    }

    #[test]
    fn test_overrides_report_unparsable_values() {
        let mut config = ConverterConfig::new();
        let rejected = config.apply_overrides_from(|key| match key {
            ENV_SKIP_FAILED => Some("maybe".to_string()),
            ENV_MAX_DEPTH => Some("abc".to_string()),
            ENV_BASE_URL => Some("http://localhost".to_string()),
            _ => None,
        });

        assert_eq!(rejected, vec![ENV_MAX_DEPTH, ENV_SKIP_FAILED]);
        assert_eq!(config.conversion.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.conversion.skip_failed_operations);
        assert_eq!(
            config.collection.base_url.as_deref(),
            Some("http://localhost")
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_parse_rejects_unknown_coercion() {
        let result = ConverterConfig::parse("[conversion]\nliteral_coercion = \"loose\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = ConverterConfig::new();
        config.collection.name = Some("Pets".to_string());
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("Pets"));
        assert_eq!(ConverterConfig::parse(&toml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = ConverterConfig::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config.conversion.test_script_extension, "x-postman-test");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[collection]\nname = \"From file\"\n").unwrap();

        let config = ConverterConfig::load(&path).unwrap();
        assert_eq!(config.collection.name.as_deref(), Some("From file"));
    }

    #[test]
    fn test_sample_config_is_valid() {
        let sample = sample_config();
        let result = ConverterConfig::parse(sample);
        assert!(result.is_ok(), "Sample config should be valid TOML");
    }
}
