//! Configuration data structures for the WAF fixture.
//!
//! These types map directly to TOML (also JSON / YAML) configuration files and
//! carry defaults so an absent file or a minimal one still yields a working
//! server.
use serde::{Deserialize, Serialize};

/// Configuration for the landing page and other static assets
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Root directory for static files
    pub root: String,
    /// File served for `GET /`
    pub index_file: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "./static".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// Logging output configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `waf_fixture=debug,tower_http=info`
    pub level: String,
    /// Emit JSON lines instead of pretty console output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin, method and header
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Top-level server configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, `IP:PORT`
    pub listen_addr: String,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout_secs: u64,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            shutdown_timeout_secs: 30,
            static_files: StaticFilesConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Full path of the landing page
    pub fn index_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.static_files.root).join(&self.static_files.index_file)
    }
}
