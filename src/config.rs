use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

/// Rows shown in the data previews, same as a dataframe `head()`.
const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            max_file_size: default_max_file_size(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn load_config() -> Result<Config> {
    // Load .env file first
    dotenv().ok();

    let defaults = Config::default();
    let config = Config {
        host: env_or("DASHBOARD_HOST", defaults.host)?,
        port: env_or("DASHBOARD_PORT", defaults.port)?,
        max_file_size: env_or("MAX_FILE_SIZE", defaults.max_file_size)?,
        preview_rows: env_or("PREVIEW_ROWS", defaults.preview_rows)?,
    };

    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
