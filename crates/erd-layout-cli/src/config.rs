//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use color::DynamicColor;
use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use erd_layout::config::{AppConfig, LayoutOptions};

use crate::error::CliError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (erd-layout/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - A configured color is not a valid CSS color
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    let candidate = match explicit_path {
        Some(path) => Some((path.as_ref().to_path_buf(), "explicit")),
        None => discover_config(),
    };

    match candidate {
        Some((path, origin)) => {
            info!(path = path.display().to_string(), origin = origin; "Loading configuration");
            read_config(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Looks for a config file in the working directory, then in the platform
/// config directory.
fn discover_config() -> Option<(PathBuf, &'static str)> {
    let local_config = PathBuf::from("erd-layout/config.toml");
    if local_config.exists() {
        return Some((local_config, "local"));
    }

    let Some(proj_dirs) = ProjectDirs::from("com", "erd-layout", "erd-layout") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system_config = proj_dirs.config_dir().join("config.toml");
    if system_config.exists() {
        return Some((system_config, "system"));
    }
    debug!(path = system_config.display().to_string(); "System configuration file not found");
    None
}

/// Reads, parses and validates the config file at `path`.
fn read_config(path: &Path) -> Result<AppConfig, CliError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    check_colors(config.layout())?;

    Ok(config)
}

/// Rejects style colors the `color` crate cannot parse.
///
/// The layout engine writes color strings through unchecked.
fn check_colors(options: &LayoutOptions) -> Result<(), ConfigError> {
    for (name, value) in [
        ("background_color", options.background_color()),
        ("border_color", options.border_color()),
        ("text_color", options.text_color()),
    ] {
        DynamicColor::from_str(value)
            .map_err(|err| ConfigError::Validation(format!("invalid {name} `{value}`: {err}")))?;
    }
    Ok(())
}
