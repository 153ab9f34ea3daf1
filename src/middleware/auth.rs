//! Bearer token authentication.
//!
//! The [`authenticate`] middleware runs on every request. It never
//! rejects: a missing, malformed, or inactive token simply leaves no
//! [`AuthPrincipal`] in the request extensions. Handlers that need a
//! caller use the [`AuthUser`] extractor, which turns an absent
//! principal into a 401. Scope checks on top of that return 403 via the
//! [`require_scope!`] extractors.

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use uuid::Uuid;

use lectern_auth::{KeyMaterial, codec};
use lectern_core::AppError;

use crate::state::AppState;

/// The verified caller attached to a request by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub user_id: Uuid,
    pub scopes: HashSet<String>,
    pub token_id: String,
}

/// Extracts the bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Verifies a bearer token and builds the principal it carries.
///
/// Returns `None` for anything that should leave the request
/// unauthenticated: bad signature, outside the validity window, or a
/// subject that is not a UUID.
pub fn principal_from_token(keys: &KeyMaterial, token: &str) -> Option<AuthPrincipal> {
    let claims = codec::decode(keys, token).ok()?;

    if !claims.window_contains(Utc::now().timestamp()) {
        return None;
    }

    let user_id = Uuid::parse_str(&claims.sub).ok()?;

    Some(AuthPrincipal {
        user_id,
        scopes: claims.scopes.into_iter().collect(),
        token_id: claims.jti,
    })
}

pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        if let Some(principal) = principal_from_token(&state.keys, token) {
            tracing::debug!(
                user_id = %principal.user_id,
                token_id = %principal.token_id,
                "Authenticated request"
            );
            req.extensions_mut().insert(principal);
        } else {
            tracing::debug!("Bearer token rejected");
        }
    }

    next.run(req).await
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthPrincipal);

impl AuthUser {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.0.scopes.contains(scope)
    }

    pub fn has_any_scope(&self, scopes: &[&str]) -> bool {
        scopes.iter().any(|s| self.has_scope(s))
    }

    pub fn has_all_scopes(&self, scopes: &[&str]) -> bool {
        scopes.iter().all(|s| self.has_scope(s))
    }

    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPrincipal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Helper macro to create scope check extractors for common scopes.
#[macro_export]
macro_rules! require_scope {
    ($name:ident, $scope:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = lectern_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                if !auth_user.has_scope($scope) {
                    return Err(lectern_core::AppError::forbidden(format!(
                        "Access denied. Missing required scope: {}",
                        $scope
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

// Pre-defined scope extractors

require_scope!(RequireUsersRead, "users:read");
