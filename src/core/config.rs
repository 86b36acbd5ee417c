//! Configuration management for the timer server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the timer collection when no path is configured.
pub const DEFAULT_TIMERS_FILE: &str = "timers.json";

/// Default port of the notification event stream.
pub const DEFAULT_EVENTS_PORT: u16 = 3001;

/// Main configuration structure for the timer server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Timer persistence configuration.
    pub timers: TimersConfig,

    /// Notification event stream configuration.
    pub events: EventsConfig,

    /// MCP transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Where active timers are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimersConfig {
    /// Path of the JSON timer file.
    pub file: PathBuf,
}

/// Notification event stream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Whether to serve the event stream at all.
    pub enabled: bool,

    /// Host address to bind to.
    pub host: String,

    /// Port number to listen on.
    pub port: u16,
}

impl EventsConfig {
    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_EVENTS_PORT,
        }
    }
}

impl Default for TimersConfig {
    fn default() -> Self {
        Self {
            file: default_timers_file(),
        }
    }
}

/// `timers.json` next to the running executable, or in the working
/// directory when the executable path is unknown.
fn default_timers_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_TIMERS_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TIMERS_FILE))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "project-timer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            timers: TimersConfig::default(),
            events: EventsConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_TIMERS_FILE`, `MCP_EVENTS_PORT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = std::env::var("MCP_TIMERS_FILE") {
            if !file.trim().is_empty() {
                config.timers.file = PathBuf::from(file);
            }
        }

        if let Ok(enabled) = std::env::var("MCP_EVENTS_ENABLED") {
            config.events.enabled = enabled.to_lowercase() != "false" && enabled != "0";
        }

        if let Ok(host) = std::env::var("MCP_EVENTS_HOST") {
            config.events.host = host;
        }

        if let Some(port) = std::env::var("MCP_EVENTS_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.events.port = port;
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "MCP_TIMERS_FILE",
        "MCP_EVENTS_ENABLED",
        "MCP_EVENTS_HOST",
        "MCP_EVENTS_PORT",
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "project-timer");
        assert!(config.events.enabled);
        assert_eq!(config.events.address(), "127.0.0.1:3001");
        assert_eq!(
            config.timers.file.file_name().and_then(|n| n.to_str()),
            Some("timers.json")
        );
    }

    #[test]
    fn test_events_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_vars();
        unsafe {
            std::env::set_var("MCP_EVENTS_HOST", "0.0.0.0");
            std::env::set_var("MCP_EVENTS_PORT", "4010");
            std::env::set_var("MCP_EVENTS_ENABLED", "false");
        }

        let config = Config::from_env();
        assert_eq!(config.events.address(), "0.0.0.0:4010");
        assert!(!config.events.enabled);
        clear_vars();
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_vars();
        unsafe {
            std::env::set_var("MCP_EVENTS_PORT", "not-a-port");
        }

        let config = Config::from_env();
        assert_eq!(config.events.port, DEFAULT_EVENTS_PORT);
        clear_vars();
    }

    #[test]
    fn test_timers_file_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_vars();
        unsafe {
            std::env::set_var("MCP_TIMERS_FILE", "/tmp/project-timers.json");
        }

        let config = Config::from_env();
        assert_eq!(config.timers.file, PathBuf::from("/tmp/project-timers.json"));
        clear_vars();
    }
}
