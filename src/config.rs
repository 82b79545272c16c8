//! Environment configuration with fallback defaults.
//!
//! `DATABASE_URL`, when set, wins over the individual `DB_*` variables.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub connect_backoff: Duration,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub port: u16,
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let database = DatabaseSettings {
            url: lookup("DATABASE_URL"),
            host: text("DB_HOST", "catalog-db"),
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            user: text("DB_USER", "guitarshop"),
            password: text("DB_PASSWORD", "guitarshop123"),
            name: text("DB_NAME", "guitarshop_catalog"),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            connect_attempts: parse_or(&lookup, "DB_CONNECT_ATTEMPTS", 15)?,
            connect_backoff: Duration::from_secs(parse_or(&lookup, "DB_CONNECT_BACKOFF_SECS", 4)?),
        };
        Ok(Settings {
            database,
            port: parse_or(&lookup, "PORT", 8080)?,
        })
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl);
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}
