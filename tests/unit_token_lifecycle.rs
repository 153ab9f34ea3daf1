//! End-to-end exercise of the token library surface: issuance, codec,
//! introspection, and opaque refresh token generation.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use uuid::Uuid;

use lectern_auth::{
    KeyMaterial, TokenError, codec, generate_refresh_token, introspect, issue_access_token,
};

fn scope_set(scopes: &[&str]) -> HashSet<String> {
    scopes.iter().map(|s| s.to_string()).collect()
}

#[test]
fn issued_token_round_trips_and_introspects_active() {
    let keys = KeyMaterial::generate().unwrap();
    let user_id = Uuid::new_v4();
    let requested = vec!["users:read".to_string(), "role:teacher".to_string()];

    let signed = issue_access_token(
        &keys,
        user_id,
        &requested,
        &scope_set(&["users:read", "role:teacher", "reports:view"]),
        3600,
        None,
    )
    .unwrap();

    let claims = codec::decode(&keys, &signed.token).unwrap();
    assert_eq!(claims, signed.claims);
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.scopes, requested);
    assert_eq!(claims.exp, claims.iat + 3600);

    let report = introspect::check(&keys, &signed.token, Utc::now());
    assert!(report.active);
    assert_eq!(report.sub.as_deref(), Some(claims.sub.as_str()));
    assert_eq!(report.scopes, Some(requested));
    assert_eq!(report.exp, Some(claims.exp));
}

#[test]
fn scope_outside_grant_is_refused_with_the_offending_scope() {
    let keys = KeyMaterial::generate().unwrap();
    let requested = vec!["users:read".to_string(), "users:delete".to_string()];

    let err = issue_access_token(
        &keys,
        Uuid::new_v4(),
        &requested,
        &scope_set(&["users:read"]),
        3600,
        None,
    )
    .unwrap_err();

    match err {
        TokenError::ScopeNotGranted(scope) => assert_eq!(scope, "users:delete"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_scope_request_is_refused() {
    let keys = KeyMaterial::generate().unwrap();

    let err = issue_access_token(
        &keys,
        Uuid::new_v4(),
        &[],
        &scope_set(&["users:read"]),
        3600,
        None,
    )
    .unwrap_err();

    assert!(matches!(err, TokenError::EmptyScopes));
}

#[test]
fn expired_token_introspects_inactive_without_claims() {
    let keys = KeyMaterial::generate().unwrap();
    let requested = vec!["users:read".to_string()];
    let past = Utc::now() - Duration::hours(2);

    let signed = issue_access_token(
        &keys,
        Uuid::new_v4(),
        &requested,
        &scope_set(&["users:read"]),
        3600,
        Some(past),
    )
    .unwrap();

    let report = introspect::check(&keys, &signed.token, Utc::now());
    assert!(!report.active);
    assert!(report.sub.is_none());
    assert!(report.scopes.is_none());
    assert!(report.exp.is_none());
}

#[test]
fn forged_token_introspects_inactive() {
    let keys = KeyMaterial::generate().unwrap();
    let other_keys = KeyMaterial::generate().unwrap();
    let requested = vec!["users:read".to_string()];

    let signed = issue_access_token(
        &other_keys,
        Uuid::new_v4(),
        &requested,
        &scope_set(&["users:read"]),
        3600,
        None,
    )
    .unwrap();

    let report = introspect::check(&keys, &signed.token, Utc::now());
    assert!(!report.active);
    assert!(report.sub.is_none());
}

#[test]
fn refresh_tokens_are_opaque_and_unique() {
    let first = generate_refresh_token();
    let second = generate_refresh_token();

    assert_ne!(first, second);
    // 48 random bytes, base64url without padding
    assert_eq!(first.len(), 64);
    assert!(
        first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
    // Not a JWT: no dots, nothing to decode
    assert!(!first.contains('.'));
}

#[test]
fn jwks_exposes_the_signing_key() {
    let keys = KeyMaterial::generate().unwrap();
    let jwks = keys.jwks();

    assert_eq!(jwks.keys.len(), 1);
    let jwk = &jwks.keys[0];
    assert_eq!(jwk.kty, "RSA");
    assert_eq!(jwk.alg, "RS256");
    assert_eq!(jwk.kid, keys.kid());
    assert!(!jwk.n.is_empty());
    assert!(!jwk.e.is_empty());
}
