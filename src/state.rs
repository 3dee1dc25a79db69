use sqlx::PgPool;
use taskshelf_config::{CorsConfig, JwtConfig, RateLimitConfig};
use taskshelf_db::init_db_pool;

use crate::modules::books::store::BookStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub books: BookStore,
}

impl AppState {
    /// State with configuration read from the environment and a freshly
    /// seeded book catalogue.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            books: BookStore::seeded(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    Ok(AppState::from_env(init_db_pool().await?))
}
