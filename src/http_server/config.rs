//! HTTP Server Configuration
//!
//! Host, port, CORS origin and the gateway's execution settings. Loaded
//! from an optional JSON file, then overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::{GolError, GolResult};
use crate::query::DEFAULT_PRECISION;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Value of `Access-Control-Allow-Origin` (default: "*")
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Coordinate precision of query output (default: 7)
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Run one request at a time (default: true)
    #[serde(default = "default_serialize_requests")]
    pub serialize_requests: bool,

    /// Directory for capture buffers (default: system temp dir)
    #[serde(default)]
    pub capture_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_serialize_requests() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            precision: default_precision(),
            serialize_requests: default_serialize_requests(),
            capture_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> GolResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GolError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ServerConfig = serde_json::from_str(&content)
            .map_err(|e| GolError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> GolResult<()> {
        self.cors_header()?;
        if self.precision > 15 {
            return Err(GolError::InvalidConfig(format!(
                "precision must be at most 15, got {}",
                self.precision
            )));
        }
        Ok(())
    }

    /// The CORS origin as a header value
    pub fn cors_header(&self) -> GolResult<HeaderValue> {
        HeaderValue::from_str(&self.cors_origin).map_err(|_| {
            GolError::InvalidConfig(format!("Invalid CORS origin: {:?}", self.cors_origin))
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.precision, 7);
        assert!(config.serialize_requests);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 9000, "cors_origin": "https://maps.example"}}"#).unwrap();
        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origin, "https://maps.example");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": "eighty"}}"#).unwrap();
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(GolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_cors_origin() {
        let config = ServerConfig {
            cors_origin: "bad\norigin".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
