use axum::Json;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use tracing::instrument;
use utoipa::ToSchema;

use lectern_core::AppError;

use super::model::{
    GrantError, GrantType, IntrospectionResponse, LoginRequest, TokenGrantForm, TokenResponse,
    parse_scope_list,
};
use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive an access and refresh token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response =
        AuthService::login(&state.db, dto, &state.keys, &state.token_config).await?;
    Ok(Json(response))
}

/// Token grant endpoint
///
/// Form-encoded, dispatched on `grant_type`: `refresh_token` exchanges a
/// refresh token for a fresh access token, `check_token` introspects an
/// access token, `revoke` invalidates a refresh token.
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body(content = TokenGrantForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Grant processed", body = TokenResponse),
        (status = 400, description = "Invalid request or invalid grant", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, form))]
pub async fn token_grant(
    State(state): State<AppState>,
    Form(form): Form<TokenGrantForm>,
) -> Result<Response, GrantError> {
    let grant_type = form
        .grant_type
        .as_deref()
        .ok_or_else(|| GrantError::InvalidRequest("grant_type is required".to_string()))?;

    let grant_type = GrantType::parse(grant_type).ok_or_else(|| {
        GrantError::InvalidRequest(format!("Unsupported grant_type: {grant_type}"))
    })?;

    match grant_type {
        GrantType::RefreshToken => {
            let refresh_token = form.refresh_token.as_deref().ok_or_else(|| {
                GrantError::InvalidRequest("refresh_token is required".to_string())
            })?;

            let requested_scopes = form
                .scopes
                .as_deref()
                .map(parse_scope_list)
                .filter(|scopes| !scopes.is_empty());

            let response = AuthService::refresh(
                &state.db,
                &state.keys,
                &state.token_config,
                refresh_token,
                requested_scopes,
            )
            .await?;

            Ok(Json(response).into_response())
        }
        GrantType::CheckToken => {
            let token = form
                .token
                .as_deref()
                .ok_or_else(|| GrantError::InvalidRequest("token is required".to_string()))?;

            // Introspection never errors: a bad token is simply inactive.
            let introspection = AuthService::introspect(&state.keys, token);
            Ok(Json(IntrospectionResponse::from(introspection)).into_response())
        }
        GrantType::Revoke => {
            let refresh_token = form.refresh_token.as_deref().ok_or_else(|| {
                GrantError::InvalidRequest("refresh_token is required".to_string())
            })?;

            AuthService::revoke(&state.db, refresh_token).await?;
            Ok(().into_response())
        }
    }
}

/// Published signing keys
#[utoipa::path(
    get,
    path = "/.well-known/jwks.json",
    responses(
        (status = 200, description = "JSON Web Key Set for access token verification")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn jwks(State(state): State<AppState>) -> Json<lectern_auth::Jwks> {
    Json(state.keys.jwks())
}
