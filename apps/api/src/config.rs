// Runtime configuration
// Read from the environment (and `.env`), with development defaults

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost:3306/club_canin";
const DEFAULT_JWT_SECRET: &str = "dev-secret-key";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup
    ///
    /// Missing keys fall back to development defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                tracing::warn!("{} not set, using default", key);
                default.to_string()
            })
        };

        let bind_raw = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let cost_raw = get("BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string());
        let bcrypt_cost = cost_raw
            .parse::<u32>()
            .ok()
            .filter(|cost| (4..=31).contains(cost))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: cost_raw.clone(),
            })?;

        let pool_raw = get("DATABASE_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string());
        let database_max_connections = pool_raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: pool_raw.clone(),
            })?;

        Ok(Self {
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_max_connections,
            jwt_secret: get("JWT_SECRET", DEFAULT_JWT_SECRET),
            bind_addr,
            bcrypt_cost,
        })
    }
}
