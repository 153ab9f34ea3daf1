use std::sync::Arc;

use lectern_auth::KeyMaterial;
use lectern_config::{CorsConfig, ReclaimerConfig, TokenConfig};
use sqlx::PgPool;

use crate::db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub token_config: TokenConfig,
    pub reclaimer_config: ReclaimerConfig,
    pub cors_config: CorsConfig,
    pub keys: Arc<KeyMaterial>,
}

/// # Panics
///
/// Panics if signing key material cannot be generated. The server must
/// not serve traffic without it.
pub async fn init_app_state() -> AppState {
    let keys = KeyMaterial::generate().expect("Failed to generate signing key material");

    AppState {
        db: init_db_pool().await,
        token_config: TokenConfig::from_env(),
        reclaimer_config: ReclaimerConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        keys: Arc::new(keys),
    }
}
