use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    IntrospectionResponse, LoginRequest, TokenGrantForm, TokenResponse,
};
use crate::modules::users::model::{Identity, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::token_grant,
        crate::modules::auth::controller::jwks,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_users,
    ),
    components(
        schemas(
            LoginRequest,
            TokenResponse,
            TokenGrantForm,
            IntrospectionResponse,
            ErrorResponse,
            User,
            Identity,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance, refresh, introspection, and revocation"),
        (name = "Users", description = "Read-only user directory endpoints")
    ),
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "Token-based authentication service built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
