//! TOML config file loading and creation.

use std::path::{Path, PathBuf};

use casement_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ShellConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields are filled from serde defaults. If validation fails, a
/// warning is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<ShellConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ShellConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(ShellConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, creates a default config file and returns
/// defaults.
pub fn load_default() -> Result<ShellConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(ShellConfig::default());
    }

    load_from_path(&path)
}

/// The platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("casement").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// The default TOML config content.
fn default_config_toml() -> &'static str {
    r##"# Casement Configuration

[window]
title = "Casement"
width = 1040
height = 768
resizable = true
fullscreen = false
frameless = false
start_hidden = false
hide_on_close = false

# Window background, RGBA channels 0-255.
[window.background]
r = 255
g = 255
b = 255
a = 255

[logging]
# EnvFilter directive, e.g. "casement=debug".
level = "casement=info"
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn loads_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\ntitle = \"Test\"\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 1040);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window\ntitle=").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\nwidth = 5\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.width, 1040);
    }

    #[test]
    fn create_default_writes_a_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        create_default_config(&path).unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.title, "Casement");
    }

    #[test]
    fn default_toml_matches_default_schema() {
        let parsed: crate::schema::ShellConfig = toml::from_str(default_config_toml()).unwrap();
        let default = crate::schema::ShellConfig::default();
        assert_eq!(parsed.window.title, default.window.title);
        assert_eq!(parsed.window.width, default.window.width);
        assert_eq!(parsed.window.height, default.window.height);
        assert_eq!(parsed.logging.level, default.logging.level);
    }
}
