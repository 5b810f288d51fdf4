//! Configuration for rewind-client
//!
//! Centralized configuration with sensible defaults.

use crate::error::{RewindError, Result};

/// Default viewer host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default viewer port
pub const DEFAULT_PORT: u16 = 7000;

/// Client configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Viewer host name or IP address
    pub host: String,

    /// Viewer TCP port
    pub port: u16,

    /// Connect timeout (milliseconds, 0 = OS default blocking connect)
    pub connect_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block indefinitely)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on the viewer socket
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// When false the startup selector hands out a no-op canvas
    /// without touching the network
    pub enabled: bool,

    /// Append a trailing `e` record to every frame payload.
    /// Needed only by viewers that commit a frame on that marker.
    pub end_marker: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 1000,
            write_timeout_ms: 0,
            nodelay: true,
            enabled: true,
            end_marker: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `host:port` address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject configurations that can never connect
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RewindError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RewindError::Config("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the viewer host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the viewer port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Enable or disable the client as a whole
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Emit a trailing `e` record in every frame payload
    pub fn end_marker(mut self, end_marker: bool) -> Self {
        self.config.end_marker = end_marker;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
