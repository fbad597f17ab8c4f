//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! A `.env` file is honored for the environment layer (loaded in main).

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    pub server_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

// ============================================================================
// Resolved Config (concrete values, no Options where a default exists)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub port: u16,
    pub server_url: String,
    /// Required for `serve`; the caller refuses to start without it.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
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

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Parley Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# port = 3000                        # Or set PORT env var

# [client]
# server_url = "http://localhost:3000"   # Or set PARLEY_SERVER_URL env var

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var (required for `serve`)
# base_url = "https://generativelanguage.googleapis.com"
# model = "gemini-1.5-flash"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_port` and `cli_server` come from CLI flags (None = not specified).
pub fn resolve(
    config: &ParleyConfig,
    cli_port: Option<u16>,
    cli_server: Option<&str>,
) -> ResolvedConfig {
    // Port: CLI → env → config → default
    let port = cli_port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    // Relay URL the client talks to: CLI → env → config → default
    let server_url = cli_server
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_SERVER_URL").ok())
        .or_else(|| config.client.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    // Gemini API key: env → config. No default — `serve` fails fast without it.
    let gemini_api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .or_else(|| config.gemini.api_key.clone());

    // Gemini base URL: env → config → default
    let gemini_base_url = std::env::var("GEMINI_BASE_URL")
        .ok()
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // Gemini model: env → config → default
    let gemini_model = std::env::var("GEMINI_MODEL")
        .ok()
        .or_else(|| config.gemini.model.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    ResolvedConfig {
        port,
        server_url,
        gemini_api_key,
        gemini_base_url,
        gemini_model,
    }
}
