//! Shared application state.

use crate::auth::TokenManager;
use crate::config::AppConfig;
use crate::domain::pickup::PickupSchedule;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub tokens: TokenManager,
    pub schedule: PickupSchedule,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: &AppConfig) -> Self {
        Self {
            db,
            tokens: TokenManager::new(&config.jwt_secret, config.token_ttl_minutes),
            schedule: PickupSchedule::new(config.pickup_slots.clone()),
        }
    }
}
