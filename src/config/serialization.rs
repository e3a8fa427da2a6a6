//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render `value` as a TOML literal, quoting and escaping as needed
fn toml_value(value: impl Into<toml::Value>) -> String {
    value.into().to_string()
}

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# slashroute configuration

# Seconds before cached per-server settings are reloaded
guild_config_ttl_secs = {ttl}

# Built-in commands: ping, echo, whois, config
[commands]
disabled = {disabled}

# Logging configuration (RUST_LOG overrides, then SLASHROUTE_LOG_LEVEL)
[logging]
level = {log_level}
# JSON log files (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            ttl = self.guild_config_ttl_secs,
            disabled = toml_value(self.commands.disabled.clone()),
            log_level = toml_value(self.logging.level.as_str()),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_value(self.logging.file_dir.display().to_string()),
            log_file_rotation = toml_value(self.logging.file_rotation.as_str()),
            log_file_prefix = toml_value(self.logging.file_prefix.as_str()),
        )
    }
}
