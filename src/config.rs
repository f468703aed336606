//! Configuration module for environment variables and application settings

use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Storage adapter selected at startup
    pub storage: StorageBackend,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric JWT signing secret, shared for the process lifetime
    pub jwt_secret: String,
}

/// Which persistence gateway adapter to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    /// Parse a backend name; unknown names are configuration errors,
    /// not a silent default.
    fn parse(value: &str) -> Result<Self> {
        match value {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!(
                "Unknown CUSTOMER_STORE value [{other}], expected postgres or memory"
            )),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let storage = match env::var("CUSTOMER_STORE") {
            Ok(value) => StorageBackend::parse(&value)?,
            Err(_) => StorageBackend::Postgres,
        };

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, falling back to dev secret");
            "dev_secret".to_string()
        });

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            auth: AuthConfig { jwt_secret },
            storage,
        })
    }
}
