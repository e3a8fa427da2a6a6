//! Configuration for the bot
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/slashroute/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides `[logging] level`
pub const ENV_LOG_LEVEL: &str = "SLASHROUTE_LOG_LEVEL";

/// Overrides `guild_config_ttl_secs`
pub const ENV_GUILD_CONFIG_TTL: &str = "SLASHROUTE_GUILD_CONFIG_TTL";

const DEFAULT_GUILD_CONFIG_TTL_SECS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long cached per-guild settings stay valid
    pub guild_config_ttl_secs: u64,

    /// Which built-in commands to register
    pub commands: CommandsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            guild_config_ttl_secs: DEFAULT_GUILD_CONFIG_TTL_SECS,
            commands: CommandsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn guild_config_ttl(&self) -> Duration {
        Duration::from_secs(self.guild_config_ttl_secs)
    }
}

/// Command registration settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandsConfig {
    /// Built-in command names to leave out of the registry
    pub disabled: Vec<String>,
}

impl CommandsConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|d| d == name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure, every field optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub guild_config_ttl_secs: Option<u64>,

    /// Optional [commands] section
    pub commands: Option<FileCommands>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileCommands {
    #[serde(default)]
    pub disabled: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/slashroute/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("slashroute").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read the config file. A missing file yields defaults; a broken one is
    /// an error so the user fixes it instead of debugging the wrong thing.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let guild_config_ttl_secs = env(ENV_GUILD_CONFIG_TTL)
            .and_then(|v| v.parse().ok())
            .or(file.guild_config_ttl_secs)
            .unwrap_or(DEFAULT_GUILD_CONFIG_TTL_SECS);

        let commands = CommandsConfig {
            disabled: file.commands.map(|c| c.disabled).unwrap_or_default(),
        };

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env(ENV_LOG_LEVEL) {
            logging.level = level;
        }

        Self {
            guild_config_ttl_secs,
            commands,
            logging,
        }
    }
}
