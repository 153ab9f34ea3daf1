use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;

use super::model::{Identity, User};

pub struct UserService;

impl UserService {
    /// Loads a user with their role names and direct authority grants.
    #[instrument(skip(db))]
    pub async fn find_identity(db: &PgPool, user_id: Uuid) -> Result<Identity, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let authorities = sqlx::query_scalar::<_, String>(
            "SELECT authority FROM user_authorities WHERE user_id = $1 ORDER BY authority",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let roles = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(Identity {
            id: user.id,
            email: user.email,
            authorities,
            roles,
        })
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        Ok(users)
    }
}
