use std::env;

use crate::errors::InventoryError;

const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub server_address: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// Reads the configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, InventoryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, InventoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let server_address =
            lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(InventoryError::Config(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(AppConfig {
            database_url,
            server_address,
            max_connections,
        })
    }
}
