use std::sync::Arc;

use lectern::state::AppState;
use lectern_auth::KeyMaterial;
use lectern_config::{CorsConfig, ReclaimerConfig, TokenConfig};
use lectern_core::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Create a test user with the given direct authorities and roles.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    authorities: &[&str],
    roles: &[&str],
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    for authority in authorities {
        sqlx::query("INSERT INTO user_authorities (user_id, authority) VALUES ($1, $2)")
            .bind(id)
            .bind(authority)
            .execute(pool)
            .await
            .unwrap();
    }

    for role in roles {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(id)
            .bind(role)
            .execute(pool)
            .await
            .unwrap();
    }

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Builds an [`AppState`] around the given pool, with fresh key material
/// and config defaults. The reclaimer job is not spawned.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        token_config: TokenConfig::from_env(),
        reclaimer_config: ReclaimerConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        keys: Arc::new(KeyMaterial::generate().unwrap()),
    }
}
