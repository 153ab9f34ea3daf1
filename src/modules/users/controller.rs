use axum::Json;
use axum::extract::State;
use tracing::instrument;

use lectern_core::AppError;

use super::model::{Identity, User};
use super::service::UserService;
use crate::middleware::auth::{AuthUser, RequireUsersRead};
use crate::state::AppState;

/// Get the authenticated user's identity
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Authenticated user's profile", body = Identity),
        (status = 401, description = "Not authenticated", body = crate::modules::auth::controller::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Identity>, AppError> {
    let identity = UserService::find_identity(&state.db, auth_user.user_id()).await?;
    Ok(Json(identity))
}

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Not authenticated", body = crate::modules::auth::controller::ErrorResponse),
        (status = 403, description = "Missing users:read scope", body = crate::modules::auth::controller::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    RequireUsersRead(_auth_user): RequireUsersRead,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}
