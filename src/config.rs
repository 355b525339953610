//! Process configuration from the environment and an optional `.env` file.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_OPENAPI_PATH: &str = "openapi.json";

/// Storage backend, chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "memory" => Ok(Backend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend: Backend,
    /// Always `Some` when `backend` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub openapi_path: PathBuf,
    /// Memory backend only: JSON file with initial records.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load `.env` (if present), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => Backend::Postgres,
        };
        let database_url = get("DATABASE_URL");
        if backend == Backend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: v,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            backend,
            database_url,
            max_connections,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            openapi_path: get("OPENAPI_PATH")
                .unwrap_or_else(|| DEFAULT_OPENAPI_PATH.into())
                .into(),
            seed_path: get("SEED_PATH").map(PathBuf::from),
        })
    }
}
