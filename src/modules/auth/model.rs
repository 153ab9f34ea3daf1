//! Auth data models and the grant error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use lectern_auth::{Introspection, TokenError};
use lectern_core::AppError;

// Login request structure
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body for login and refresh grants.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Form body of the token endpoint. Every field is optional at the
/// deserialization layer; the dispatcher enforces which ones a given
/// grant type requires.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenGrantForm {
    pub grant_type: Option<String>,
    pub refresh_token: Option<String>,
    pub token: Option<String>,
    pub scopes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    RefreshToken,
    CheckToken,
    Revoke,
}

impl GrantType {
    /// Case-insensitive parse of the `grant_type` form field.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "refresh_token" => Some(Self::RefreshToken),
            "check_token" => Some(Self::CheckToken),
            "revoke" => Some(Self::Revoke),
            _ => None,
        }
    }
}

/// Splits a scope list on spaces and commas, dropping empty segments
/// and duplicates while keeping first-seen order.
pub fn parse_scope_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split([' ', ','])
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(String::from)
        .collect()
}

/// RFC 7662 introspection response. Claim fields are omitted entirely
/// for inactive tokens.
#[derive(Debug, Serialize, ToSchema)]
pub struct IntrospectionResponse {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl From<Introspection> for IntrospectionResponse {
    fn from(value: Introspection) -> Self {
        Self {
            active: value.active,
            sub: value.sub,
            scopes: value.scopes,
            exp: value.exp,
        }
    }
}

/// A stored refresh token. The raw opaque token is the primary key.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRow {
    pub token: String,
    pub user_id: Uuid,
    pub scopes: Vec<String>,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub not_before: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Failure taxonomy of the token endpoint, rendered as OAuth-style
/// error bodies.
///
/// `InvalidGrant` deliberately carries no detail: not-found, expired,
/// revoked, and scope-exceeded refresh attempts are indistinguishable
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum GrantError {
    #[error("invalid_request: {0}")]
    InvalidRequest(String),
    #[error("invalid_grant")]
    InvalidGrant,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for GrantError {
    fn into_response(self) -> Response {
        match self {
            GrantError::InvalidRequest(description) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_request",
                    "error_description": description,
                })),
            )
                .into_response(),
            GrantError::InvalidGrant => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "The provided grant is invalid, expired, or revoked",
                })),
            )
                .into_response(),
            GrantError::Internal(error) => {
                tracing::error!("Grant processing failed: {:#}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "server_error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<TokenError> for GrantError {
    fn from(error: TokenError) -> Self {
        match error {
            // A refresh asked for scopes beyond the grant, or for none.
            TokenError::ScopeNotGranted(_) | TokenError::EmptyScopes => GrantError::InvalidGrant,
            TokenError::Verification => GrantError::InvalidGrant,
            TokenError::Encoding(_) | TokenError::KeyGeneration(_) => {
                GrantError::Internal(anyhow::Error::from(error))
            }
        }
    }
}

impl From<sqlx::Error> for GrantError {
    fn from(error: sqlx::Error) -> Self {
        GrantError::Internal(anyhow::Error::from(error))
    }
}

impl From<AppError> for GrantError {
    fn from(error: AppError) -> Self {
        GrantError::Internal(error.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_type_parse_case_insensitive() {
        assert_eq!(GrantType::parse("refresh_token"), Some(GrantType::RefreshToken));
        assert_eq!(GrantType::parse("REFRESH_TOKEN"), Some(GrantType::RefreshToken));
        assert_eq!(GrantType::parse("Check_Token"), Some(GrantType::CheckToken));
        assert_eq!(GrantType::parse("revoke"), Some(GrantType::Revoke));
        assert_eq!(GrantType::parse("password"), None);
        assert_eq!(GrantType::parse(""), None);
    }

    #[test]
    fn test_parse_scope_list_delimiters() {
        assert_eq!(
            parse_scope_list("users:read users:write"),
            vec!["users:read", "users:write"]
        );
        assert_eq!(
            parse_scope_list("users:read,users:write"),
            vec!["users:read", "users:write"]
        );
        assert_eq!(
            parse_scope_list("users:read, users:write"),
            vec!["users:read", "users:write"]
        );
    }

    #[test]
    fn test_parse_scope_list_drops_empties_and_duplicates() {
        assert_eq!(
            parse_scope_list("  a,,b  a "),
            vec!["a", "b"]
        );
        assert!(parse_scope_list("").is_empty());
        assert!(parse_scope_list("  ,, ").is_empty());
    }
}
