//! CLI binary entry point for swagger-collection-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use swagger_collection_sdk::cli::commands::config::handle_sample_config;
#[cfg(feature = "cli")]
use swagger_collection_sdk::cli::commands::convert::{ConvertArgs, InputSource, handle_convert};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "swagger-collection-cli")]
#[command(about = "Convert Swagger 2.0 documents into Postman collections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a Swagger 2.0 document into a Postman collection v2.1
    Convert {
        /// Input document (JSON or YAML file path, or '-' for stdin)
        input: String,
        /// Output collection file path
        output: PathBuf,
        /// Configuration file (defaults to .swagger-collection.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Collection name (defaults to info.title)
        #[arg(long)]
        name: Option<String>,
        /// Value of the {{baseUrl}} variable
        #[arg(long)]
        base_url: Option<String>,
        /// Maximum nesting of generated example bodies
        #[arg(long)]
        max_depth: Option<usize>,
        /// Skip operations that fail to convert instead of aborting
        #[arg(long)]
        skip_failed: bool,
        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,
        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print a sample configuration file
    SampleConfig,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Convert { verbose: true, .. });
    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            name,
            base_url,
            max_depth,
            skip_failed,
            force,
            verbose: _,
        } => {
            let args = ConvertArgs {
                input: InputSource::from_arg(&input),
                output,
                config,
                name,
                base_url,
                max_depth,
                skip_failed,
                force,
            };
            handle_convert(&args)
        }
        Commands::SampleConfig => handle_sample_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
