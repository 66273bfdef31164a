use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATA_DIR | ./data | Directory holding the SQLite database |
/// | HTTP_PORT | 5000 | HTTP service port |
/// | ENVIRONMENT | development | development \| production |
/// | LOG_LEVEL | info | Tracing filter level |
/// | LOG_DIR | (unset) | Optional directory for daily log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite database file
    pub data_dir: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | production
    pub environment: String,
    /// Tracing filter level
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override data directory and port — used by tests
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("directory.db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
