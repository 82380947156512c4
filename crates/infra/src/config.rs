//! Process configuration, read from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
/// `wasm-pack build crates/client --target web` output, relative to the workspace root.
const DEFAULT_STATIC_DIR: &str = "crates/client/pkg";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// When set, products are persisted in Postgres; otherwise in memory.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Directory holding the built frontend bundle, served under `/pkg`.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Read `HOST`, `PORT`, `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `STATIC_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_or(&lookup, "HOST", DEFAULT_HOST.parse().ok())?;
        let port: u16 = parse_or(&lookup, "PORT", Some(DEFAULT_PORT))?;
        let db_max_connections: u32 =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", Some(DEFAULT_DB_MAX_CONNECTIONS))?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let static_dir: PathBuf = parse_or(&lookup, "STATIC_DIR", Some(DEFAULT_STATIC_DIR.into()))?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_url,
            db_max_connections,
            static_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value: raw,
        }),
        None => default.ok_or_else(|| ConfigError::Invalid {
            var,
            value: String::new(),
            reason: "missing".to_string(),
        }),
    }
}
