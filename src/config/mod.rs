use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::WikiError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: Arc<PathBuf>,
    pub template_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: Arc::new(PathBuf::from("data")),
            template_dir: Arc::new(PathBuf::from("templates")),
            static_dir: Arc::new(PathBuf::from("static")),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        data_dir: PathBuf,
        template_dir: PathBuf,
        static_dir: PathBuf,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            data_dir: Arc::new(data_dir),
            template_dir: Arc::new(template_dir),
            static_dir: Arc::new(static_dir),
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Build configuration from `WIKI_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, WikiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, WikiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let dir = |key: &str, fallback: &Arc<PathBuf>| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| fallback.to_path_buf())
        };

        let port = match lookup("WIKI_PORT") {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                WikiError::Config(format!("WIKI_PORT is not a valid port: {:?}", raw))
            })?),
            None => None,
        };

        let config = Self::with_custom(
            dir("WIKI_DATA_DIR", &defaults.data_dir),
            dir("WIKI_TEMPLATE_DIR", &defaults.template_dir),
            dir("WIKI_STATIC_DIR", &defaults.static_dir),
            port,
            lookup("WIKI_HOST"),
        );
        config.socket_addr()?;
        Ok(config)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            WikiError::Config(format!("WIKI_HOST is not a valid IP address: {:?}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
