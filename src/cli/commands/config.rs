//! Configuration command handlers

use crate::cli::error::CliError;
use crate::config::sample_config;

/// Print a commented sample configuration file
pub fn handle_sample_config() -> Result<(), CliError> {
    print!("{}", sample_config());
    Ok(())
}
