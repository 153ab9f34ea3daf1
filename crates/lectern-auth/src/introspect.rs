//! Token introspection: validity checks without minting anything.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec;
use crate::keys::KeyMaterial;

/// Result of introspecting an access token.
///
/// An inactive result carries no claims at all: callers cannot tell a
/// forged token from a malformed or expired one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Introspection {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Introspection {
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Verifies signature and validity window, surfacing claims only when both
/// hold at `now`. Zero clock-skew leeway: the window is `nbf <= now <= exp`
/// exactly.
pub fn check(keys: &KeyMaterial, token: &str, now: DateTime<Utc>) -> Introspection {
    let Ok(claims) = codec::decode(keys, token) else {
        return Introspection::inactive();
    };

    if !claims.window_contains(now.timestamp()) {
        return Introspection::inactive();
    }

    Introspection {
        active: true,
        sub: Some(claims.sub),
        scopes: Some(claims.scopes),
        exp: Some(claims.exp),
    }
}
