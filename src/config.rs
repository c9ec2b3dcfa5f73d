// config.rs
use std::env;
use std::str::FromStr;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::configuration(format!(
                "ARCHIVE_STORE must be 'mongo' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub database_name: String,
    pub log_level: tracing::Level,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("ARCHIVE_STORE") {
            Some(value) => value.parse()?,
            None => StorageBackend::Mongo,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage == StorageBackend::Mongo && database_url.is_none() {
            return Err(AppError::configuration(
                "DATABASE_URL must be set when ARCHIVE_STORE is 'mongo'",
            ));
        }

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| AppError::configuration(format!("PORT must be a number, got '{}'", value)))?,
            None => 10000,
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value
                .parse()
                .map_err(|_| AppError::configuration(format!("Unknown LOG_LEVEL '{}'", value)))?,
            None => tracing::Level::INFO,
        };

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            storage,
            database_url,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "archivedb".to_string()),
            log_level,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
