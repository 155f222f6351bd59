//! Service configuration loaded from the environment.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use tracing::info;

/// Configuration errors name the offending variable
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub database_max_connections: u32,
    /// How often the tour catalog cache is reloaded
    pub catalog_refresh: Duration,
    /// Allowed browser origin; `None` allows any
    pub cors_allowed_origin: Option<String>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0:8080")?,
            database_max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", "10")?,
            catalog_refresh: Duration::from_secs(try_load(&lookup, "CATALOG_REFRESH_SECS", "600")?),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()),
            run_migrations: parse_bool("RUN_MIGRATIONS", lookup("RUN_MIGRATIONS"), true)?,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}

fn parse_bool(
    key: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    match value.as_deref() {
        None => Ok(default),
        Some("1" | "true" | "TRUE" | "yes" | "YES") => Ok(true),
        Some("0" | "false" | "FALSE" | "no" | "NO") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            value: other.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
