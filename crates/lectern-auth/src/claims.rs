//! Access token claim structure.

use serde::{Deserialize, Serialize};

/// Claims embedded in a signed access token.
///
/// Invariant: `iat <= nbf <= exp`. In practice `nbf == iat` unless the
/// issuer is given an explicit not-before override, which exists only for
/// controlled expiry testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User id (subject claim).
    pub sub: String,
    /// Granted permission scopes. Never empty in an issued token.
    pub scopes: Vec<String>,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Not-before (Unix timestamp).
    pub nbf: i64,
    /// Expiry (Unix timestamp).
    pub exp: i64,
    /// Unique token id, for logging and traceability only.
    pub jti: String,
}

impl AccessTokenClaims {
    /// Whether `now` falls inside the token's validity window (inclusive
    /// on both ends, no clock-skew slack).
    pub fn window_contains(&self, now: i64) -> bool {
        self.nbf <= now && now <= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(nbf: i64, exp: i64) -> AccessTokenClaims {
        AccessTokenClaims {
            sub: "user-1".to_string(),
            scopes: vec!["users:read".to_string()],
            iat: nbf,
            nbf,
            exp,
            jti: "jti-1".to_string(),
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let c = claims(100, 200);
        assert!(c.window_contains(100));
        assert!(c.window_contains(200));
        assert!(!c.window_contains(99));
        assert!(!c.window_contains(201));
    }

    #[test]
    fn test_claims_serde_roundtrip() {
        let c = claims(100, 200);
        let json = serde_json::to_string(&c).unwrap();
        let back: AccessTokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
