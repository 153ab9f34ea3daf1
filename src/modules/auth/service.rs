use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_auth::{
    KeyMaterial, Introspection, TokenError, generate_refresh_token, issue_access_token,
};
use lectern_config::TokenConfig;
use lectern_core::{AppError, verify_password};

use super::model::{GrantError, LoginRequest, RefreshTokenRow, TokenResponse};
use crate::modules::audit::model::AuditEvent;
use crate::modules::audit::service::AuditService;
use crate::modules::users::service::UserService;

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and issues an access and refresh token pair
    /// covering the user's full current effective authority set.
    #[instrument(skip(db, dto, keys))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        keys: &KeyMaterial,
        token_config: &TokenConfig,
    ) -> Result<TokenResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            password: String,
        }

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, password FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let identity = UserService::find_identity(db, user.id).await?;
        let scopes = identity.effective_authorities();
        let granted: std::collections::HashSet<String> = scopes.iter().cloned().collect();

        // An account with no authorities and no roles cannot hold a
        // token. Refuse it the same way as bad credentials so the
        // response does not reveal that the account exists.
        let signed = issue_access_token(
            keys,
            user.id,
            &scopes,
            &granted,
            token_config.access_token_lifetime,
            None,
        )
        .map_err(|e| match e {
            TokenError::EmptyScopes | TokenError::ScopeNotGranted(_) => {
                AppError::unauthorized("Invalid email or password")
            }
            other => AppError::internal(anyhow::Error::from(other)),
        })?;

        let refresh_token =
            Self::store_refresh_token(db, user.id, &scopes, token_config.refresh_token_lifetime)
                .await?;

        Self::audit(db, &AuditEvent::login(user.id)).await;
        Self::audit(
            db,
            &AuditEvent::token("issue", Some(user.id), Some(signed.claims.jti.clone())),
        )
        .await;

        Ok(TokenResponse::bearer(
            signed.token,
            refresh_token,
            token_config.access_token_lifetime,
        ))
    }

    /// Mints an opaque refresh token and persists its grant.
    #[instrument(skip(db, scopes))]
    pub async fn store_refresh_token(
        db: &PgPool,
        user_id: Uuid,
        scopes: &[String],
        lifetime_secs: i64,
    ) -> Result<String, AppError> {
        let token = generate_refresh_token();
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::seconds(lifetime_secs);

        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id, scopes, issued_at, not_before, expires_at)
             VALUES ($1, $2, $3, $4, $4, $5)",
        )
        .bind(&token)
        .bind(user_id)
        .bind(scopes)
        .bind(issued_at)
        .bind(expires_at)
        .execute(db)
        .await?;

        Ok(token)
    }

    /// Exchanges a live refresh token for a fresh access token.
    ///
    /// The presented refresh token is echoed back unchanged; a grant
    /// stays valid until its own expiry regardless of how many access
    /// tokens it has produced. Authorities are re-read on every
    /// exchange, so a revoked role or grant takes effect at the next
    /// refresh even while the stored row lives on.
    ///
    /// All refusal causes collapse into [`GrantError::InvalidGrant`].
    #[instrument(skip(db, keys, raw_token))]
    pub async fn refresh(
        db: &PgPool,
        keys: &KeyMaterial,
        token_config: &TokenConfig,
        raw_token: &str,
        requested_scopes: Option<Vec<String>>,
    ) -> Result<TokenResponse, GrantError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT token, user_id, scopes, issued_at, not_before, expires_at
             FROM refresh_tokens
             WHERE token = $1 AND not_before <= now() AND expires_at >= now()",
        )
        .bind(raw_token)
        .fetch_optional(db)
        .await?
        .ok_or(GrantError::InvalidGrant)?;

        // A deleted subject invalidates the grant; anything else is a
        // real fault.
        let identity = UserService::find_identity(db, row.user_id)
            .await
            .map_err(|err| match err.status {
                axum::http::StatusCode::NOT_FOUND => GrantError::InvalidGrant,
                _ => GrantError::Internal(err.error),
            })?;
        let authorities = identity.effective_authorities();
        let granted: std::collections::HashSet<String> = authorities.iter().cloned().collect();

        let requested = requested_scopes.unwrap_or(authorities);

        let signed = issue_access_token(
            keys,
            row.user_id,
            &requested,
            &granted,
            token_config.access_token_lifetime,
            None,
        )?;

        Self::audit(
            db,
            &AuditEvent::token("refresh", Some(row.user_id), Some(signed.claims.jti.clone())),
        )
        .await;

        Ok(TokenResponse::bearer(
            signed.token,
            raw_token.to_string(),
            token_config.access_token_lifetime,
        ))
    }

    /// Deletes a refresh token grant. Unknown tokens are a no-op so the
    /// operation is idempotent and leaks nothing about token validity.
    #[instrument(skip(db, raw_token))]
    pub async fn revoke(db: &PgPool, raw_token: &str) -> Result<(), GrantError> {
        let revoked_user = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM refresh_tokens WHERE token = $1 RETURNING user_id",
        )
        .bind(raw_token)
        .fetch_optional(db)
        .await?;

        if let Some(user_id) = revoked_user {
            Self::audit(db, &AuditEvent::token("revoke", Some(user_id), None)).await;
        }

        Ok(())
    }

    /// Introspects an access token. Never fails: any unverifiable or
    /// out-of-window token reports as inactive.
    pub fn introspect(keys: &KeyMaterial, token: &str) -> Introspection {
        lectern_auth::introspect::check(keys, token, Utc::now())
    }

    /// Deletes refresh token rows past their expiry. Returns the number
    /// of rows removed.
    #[instrument(skip(db))]
    pub async fn reclaim_expired(db: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < now()")
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    /// Audit writes must not fail the operation they describe.
    async fn audit(db: &PgPool, event: &AuditEvent) {
        if let Err(error) = AuditService::record(db, event).await {
            tracing::warn!(
                action = %event.action,
                "Failed to record audit event: {}",
                error.error
            );
        }
    }
}
