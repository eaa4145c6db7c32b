//! Environment-driven configuration
//!
//! Settings come from the environment (a `.env` file is honored in
//! development via dotenvy, loaded by the entrypoint before this runs).

use std::env;
use std::net::SocketAddr;

use anyhow::Context;

/// Runtime configuration for the web frontend
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the booking backend's Postgres
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Connection pool size
    pub max_db_connections: u32,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8000")?;

        let max_db_connections = match env::var("MAX_DB_CONNECTIONS") {
            Ok(raw) => raw.parse().context("MAX_DB_CONNECTIONS must be an integer")?,
            Err(_) => 10,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_db_connections,
        })
    }
}
