//! Configuration management for the RAX auth server
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `RAX_AUTH_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Which credential store backend to open at startup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

/// Credential store settings
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// JSON file holding the records (file backend only)
    /// Environment: RAX_AUTH_STORE__PATH
    pub path: Option<String>,
}

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the control listener
    pub bind_address: String,

    /// Port for the control listener (0 picks an ephemeral port)
    /// Environment: RAX_AUTH_CONTROL_PORT
    pub control_port: u16,

    /// Maximum concurrently connected clients
    /// Environment: RAX_AUTH_MAX_CLIENTS
    pub max_clients: usize,

    /// Maximum command line length in bytes
    pub max_command_length: usize,

    /// Seconds a client may stay idle before being disconnected
    pub idle_timeout_secs: u64,

    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            control_port: 2323,
            max_clients: 10,
            max_command_length: 512,
            idle_timeout_secs: 300,
            store: StoreConfig {
                backend: StoreBackend::Memory,
                path: None,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem with environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("control_port", i64::from(defaults.control_port))?
            .set_default("max_clients", defaults.max_clients as i64)?
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .set_default("idle_timeout_secs", defaults.idle_timeout_secs as i64)?
            .set_default("store.backend", "memory")?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("RAX_AUTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.store.backend == StoreBackend::File
            && self.store.path.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(config::ConfigError::Message(
                "store.path is required for the file backend".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and control port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.control_port)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.control_socket(), "127.0.0.1:2323");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.max_clients, 10);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn file_backend_requires_path() {
        let mut config = ServerConfig::default();
        config.store.backend = StoreBackend::File;
        assert!(config.validate().is_err());

        config.store.path = Some("data/credentials.json".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_max_clients_is_rejected() {
        let config = ServerConfig {
            max_clients: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
