//! Casement shell configuration.
//!
//! TOML-based configuration for the window options handed to the host
//! and the shell's own logging. All sections use serde defaults, so a
//! partial (or absent) config works out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LoggingOptions, ShellConfig, WindowOptions, CONFIG_SCHEMA_VERSION};

use casement_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// file if none exists, and validates the result.
pub fn load_config() -> Result<ShellConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
