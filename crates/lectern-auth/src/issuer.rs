//! Access token issuance and refresh token generation.

use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::claims::AccessTokenClaims;
use crate::codec;
use crate::error::TokenError;
use crate::keys::KeyMaterial;

/// Entropy of an opaque refresh token. 48 bytes encode to 64 url-safe
/// characters, comfortably past guessing resistance.
const REFRESH_TOKEN_BYTES: usize = 48;

/// A freshly signed access token together with the claims it carries.
///
/// The claims are returned alongside the compact string so callers can
/// audit-log the `jti` without re-decoding their own token.
#[derive(Debug, Clone)]
pub struct SignedAccessToken {
    pub token: String,
    pub claims: AccessTokenClaims,
}

/// Builds and signs an access token for `subject`.
///
/// Preconditions: `requested_scopes` is non-empty and every entry is
/// contained in `granted` (the identity's effective authorities, i.e.
/// direct authorities plus role-derived ones). `not_before` defaults to
/// now and exists only for controlled expiry testing.
///
/// No side effects: access tokens are never persisted.
///
/// # Errors
///
/// [`TokenError::EmptyScopes`] for an empty request,
/// [`TokenError::ScopeNotGranted`] when a scope falls outside `granted`,
/// [`TokenError::Encoding`] if signing fails.
pub fn issue_access_token(
    keys: &KeyMaterial,
    subject: Uuid,
    requested_scopes: &[String],
    granted: &HashSet<String>,
    lifetime_secs: i64,
    not_before: Option<DateTime<Utc>>,
) -> Result<SignedAccessToken, TokenError> {
    if requested_scopes.is_empty() {
        return Err(TokenError::EmptyScopes);
    }
    for scope in requested_scopes {
        if !granted.contains(scope) {
            return Err(TokenError::ScopeNotGranted(scope.clone()));
        }
    }

    let nbf = not_before.unwrap_or_else(Utc::now).timestamp();
    let claims = AccessTokenClaims {
        sub: subject.to_string(),
        scopes: requested_scopes.to_vec(),
        iat: nbf,
        nbf,
        exp: nbf + lifetime_secs,
        jti: Uuid::new_v4().to_string(),
    };

    let token = codec::encode(keys, &claims)?;
    Ok(SignedAccessToken { token, claims })
}

/// Generates an opaque refresh token from the system RNG.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
