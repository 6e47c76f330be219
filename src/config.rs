use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    /// Upper bound on a single report query.
    pub query_timeout: Duration,

    // Rate limiting
    pub rate_analytics_per_min: u32,

    /// Exact origin allowed by CORS; any origin when unset.
    pub cors_allowed_origin: Option<String>,
    pub log_dir: String,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 10)?,
            query_timeout: Duration::from_secs(non_zero("QUERY_TIMEOUT_SECS", 10)?), // default 10 s

            rate_analytics_per_min: parsed("RATE_ANALYTICS_PER_MIN", 600)?,

            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok().filter(|o| !o.is_empty()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Like [`parsed`], but `0` is rejected.
fn non_zero(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match parsed(name, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        n => Ok(n),
    }
}
