//! Environment-driven configuration, read once at startup.

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub nats_url: Option<String>,
    pub max_db_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8083".to_string())
            .parse()
            .context("PORT must be a number")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let nats_url = std::env::var("NATS_URL").ok();
        let max_db_connections = std::env::var("MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        Ok(Self { database_url, port, jwt_secret, nats_url, max_db_connections })
    }
}
