//! Convert command handler

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, ConverterConfig};
use crate::convert::{CollectionConverter, ConversionOutcome};
use crate::export::CollectionExporter;
use crate::import::SwaggerImporter;

/// Input source for conversion
#[derive(Debug, Clone)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    String(String),
}

impl InputSource {
    /// `-` reads from stdin, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub input: InputSource,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub max_depth: Option<usize>,
    pub skip_failed: bool,
    pub force: bool,
}

/// Load input content from InputSource
pub fn load_input(input: &InputSource) -> Result<String, CliError> {
    match input {
        InputSource::File(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.clone()));
            }
            std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
            Ok(buffer)
        }
        InputSource::String(content) => Ok(content.clone()),
    }
}

/// Resolve the configuration: file (explicit or default), environment,
/// then command-line overrides
pub fn resolve_config(args: &ConvertArgs) -> Result<ConverterConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.clone()));
            }
            ConverterConfig::load(path)?
        }
        None => ConverterConfig::load(Path::new(CONFIG_FILENAME))?,
    };

    if let Some(name) = &args.name {
        config.collection.name = Some(name.clone());
    }
    if let Some(base_url) = &args.base_url {
        config.collection.base_url = Some(base_url.clone());
    }
    if let Some(max_depth) = args.max_depth {
        config.conversion.max_depth = max_depth;
    }
    if args.skip_failed {
        config.conversion.skip_failed_operations = true;
    }
    config.validate()?;
    Ok(config)
}

/// Import, convert and export in one go
pub fn run_convert(args: &ConvertArgs) -> Result<ConversionOutcome, CliError> {
    if args.output.exists() && !args.force {
        return Err(CliError::OutputExists(args.output.clone()));
    }

    let config = resolve_config(args)?;
    debug!("Using configuration: {:?}", config);

    let content = load_input(&args.input)?;
    let document = SwaggerImporter::new()
        .with_max_depth(config.conversion.max_depth)
        .parse(&content)?;

    let outcome = CollectionConverter::new(config).convert(&document)?;
    CollectionExporter::new().export_to_file(&outcome.collection, &args.output)?;
    Ok(outcome)
}

/// Handle the convert command
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let outcome = run_convert(args)?;

    println!(
        "Wrote {} requests to {}",
        outcome.collection.item.len(),
        args.output.display()
    );
    if !outcome.skipped.is_empty() {
        eprintln!("Skipped {} operations:", outcome.skipped.len());
        for skipped in &outcome.skipped {
            eprintln!("  {} {}: {}", skipped.method, skipped.path, skipped.reason);
        }
    }
    Ok(())
}
