//! Environment-driven configuration.

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub pickup_slots: Vec<String>,
}

/// Canteen counter windows used when `PICKUP_SLOTS` is not set.
const DEFAULT_PICKUP_SLOTS: &[&str] = &["09:30-09:50", "12:00-12:40", "15:10-15:30"];

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        let port = std::env::var("PORT").unwrap_or_else(|_| "8083".to_string());
        let token_ttl_minutes = std::env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 8);
        let pickup_slots = std::env::var("PICKUP_SLOTS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| DEFAULT_PICKUP_SLOTS.iter().map(|s| s.to_string()).collect());
        Ok(Self { database_url, port, jwt_secret, token_ttl_minutes, pickup_slots })
    }
}
