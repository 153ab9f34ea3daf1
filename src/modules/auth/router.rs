use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{jwks, login_user, token_grant};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/token", post(token_grant))
}

pub fn init_well_known_router() -> Router<AppState> {
    Router::new().route("/jwks.json", get(jwks))
}
