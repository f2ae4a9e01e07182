//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.roster/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub store_path: Option<String>,
    pub retry_invalid: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptConfig {
    pub newline: Option<bool>,
    pub question_color: Option<String>,
    pub valid_color: Option<String>,
    pub invalid_color: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_STORE_PATH: &str = "users.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub store_path: PathBuf,
    pub retry_invalid: bool,
    pub prompt: PromptSettings,
}

/// Prompt layout and color names. A `None` color keeps the UI's default;
/// the names are only interpreted by the terminal layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub newline: bool,
    pub question_color: Option<String>,
    pub valid_color: Option<String>,
    pub invalid_color: Option<String>,
}

/// Values coming from CLI flags (None/false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub store_path: Option<PathBuf>,
    pub retry_invalid: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.roster/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".roster").join("config.toml"))
}

/// Load config from `~/.roster/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RosterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RosterConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(RosterConfig::default());
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<RosterConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(RosterConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RosterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Roster Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# store_path = "users.json"          # Or set ROSTER_STORE env var
# retry_invalid = false              # true: re-prompt instead of dropping the record

# [prompt]
# newline = false                    # Put the answer on its own line
# question_color = "dark_blue"
# valid_color = "green"
# invalid_color = "red"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RosterConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Store path: CLI → env → config → default
    let store_path = cli
        .store_path
        .clone()
        .or_else(|| std::env::var("ROSTER_STORE").ok().map(PathBuf::from))
        .or_else(|| config.general.store_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

    let retry_invalid = cli.retry_invalid || config.general.retry_invalid.unwrap_or(false);

    let prompt = PromptSettings {
        newline: config.prompt.newline.unwrap_or(false),
        question_color: config.prompt.question_color.clone(),
        valid_color: config.prompt.valid_color.clone(),
        invalid_color: config.prompt.invalid_color.clone(),
    };

    ResolvedConfig {
        store_path,
        retry_invalid,
        prompt,
    }
}
