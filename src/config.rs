//! Configuration module
//!
//! Settings load from a TOML file (default: the user config dir,
//! overridable via the STAYHUB_CONFIG environment variable); every
//! section falls back to sensible defaults so a missing file still
//! yields a runnable service.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub booking: BookingConfig,
    pub gateway: GatewaySettings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL, e.g. "sqlite://./stayhub.db?mode=rwc"
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./stayhub.db?mode=rwc".to_string(),
        }
    }
}

/// Booking workflow settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Minutes an unpaid booking holds its slot before the sweeper
    /// expires it
    pub hold_minutes: i64,
    /// How often the expiry sweeper runs
    pub sweep_interval_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            hold_minutes: 60,
            sweep_interval_secs: 60,
        }
    }
}

/// Payment gateway settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// When false, gateway bookings downgrade to manual transfer
    pub enabled: bool,
    pub base_url: String,
    pub server_key: String,
    pub timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            server_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing env-filter directive, e.g. "info" or "stayhub=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Default config path: `<user config dir>/stayhub/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stayhub")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.booking.hold_minutes, 60);
        assert_eq!(cfg.booking.sweep_interval_secs, 60);
        assert!(!cfg.gateway.enabled);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_toml_keeps_defaults_elsewhere() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [booking]
            hold_minutes = 30

            [gateway]
            enabled = true
            base_url = "https://pay.example.com"
            server_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.booking.hold_minutes, 30);
        assert_eq!(cfg.booking.sweep_interval_secs, 60);
        assert!(cfg.gateway.enabled);
        assert_eq!(cfg.gateway.timeout_secs, 10);
    }
}
