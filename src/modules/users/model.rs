//! User data models.
//!
//! Users are the subjects that tokens are issued for. The directory is
//! read-only from the API's point of view: accounts, role assignments,
//! and direct authority grants are provisioned out of band.
//!
//! # Core Types
//!
//! - [`User`] - Base user entity from the database
//! - [`Identity`] - A user with their resolved roles and authorities

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Scope prefix that marks an authority as derived from a role.
///
/// The prefix is reserved: direct authority grants must never start
/// with it, so a `role:` scope in a token always names a role.
pub const ROLE_SCOPE_PREFIX: &str = "role:";

/// A user in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A user together with their resolved role and authority sets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    /// Direct authority grants, e.g. `users:read`.
    pub authorities: Vec<String>,
    /// Role names, without the `role:` prefix.
    pub roles: Vec<String>,
}

impl Identity {
    /// The full scope set this identity may be granted: every direct
    /// authority plus one `role:`-prefixed scope per role.
    pub fn effective_authorities(&self) -> Vec<String> {
        let mut scopes = self.authorities.clone();
        scopes.extend(
            self.roles
                .iter()
                .map(|role| format!("{ROLE_SCOPE_PREFIX}{role}")),
        );
        scopes
    }
}
