//! Tests for the bearer authentication helpers that back the gate
//! middleware. The middleware itself only wires these into axum, so the
//! pure helpers carry the behavior worth pinning down.

use std::collections::HashSet;

use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use uuid::Uuid;

use lectern::middleware::auth::{bearer_token, principal_from_token};
use lectern_auth::{KeyMaterial, issue_access_token};

fn scope_set(scopes: &[&str]) -> HashSet<String> {
    scopes.iter().map(|s| s.to_string()).collect()
}

fn issue(keys: &KeyMaterial, user_id: Uuid, scopes: &[&str], lifetime: i64) -> String {
    let requested: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    issue_access_token(keys, user_id, &requested, &scope_set(scopes), lifetime, None)
        .unwrap()
        .token
}

#[test]
fn bearer_token_requires_bearer_scheme() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, "Bearer my-token".parse().unwrap());
    assert_eq!(bearer_token(&headers), Some("my-token"));

    let mut basic = HeaderMap::new();
    basic.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
    assert_eq!(bearer_token(&basic), None);

    // Scheme comparison is exact
    let mut lowercase = HeaderMap::new();
    lowercase.insert(header::AUTHORIZATION, "bearer my-token".parse().unwrap());
    assert_eq!(bearer_token(&lowercase), None);

    assert_eq!(bearer_token(&HeaderMap::new()), None);
}

#[test]
fn valid_token_yields_principal() {
    let keys = KeyMaterial::generate().unwrap();
    let user_id = Uuid::new_v4();
    let token = issue(&keys, user_id, &["users:read", "role:teacher"], 3600);

    let principal = principal_from_token(&keys, &token).expect("token should authenticate");
    assert_eq!(principal.user_id, user_id);
    assert!(principal.scopes.contains("users:read"));
    assert!(principal.scopes.contains("role:teacher"));
    assert!(!principal.token_id.is_empty());
}

#[test]
fn expired_token_yields_no_principal() {
    let keys = KeyMaterial::generate().unwrap();
    let past = Utc::now() - Duration::hours(2);
    let requested = vec!["users:read".to_string()];
    let signed = issue_access_token(
        &keys,
        Uuid::new_v4(),
        &requested,
        &scope_set(&["users:read"]),
        3600,
        Some(past),
    )
    .unwrap();

    assert!(principal_from_token(&keys, &signed.token).is_none());
}

#[test]
fn not_yet_valid_token_yields_no_principal() {
    let keys = KeyMaterial::generate().unwrap();
    let future = Utc::now() + Duration::hours(1);
    let requested = vec!["users:read".to_string()];
    let signed = issue_access_token(
        &keys,
        Uuid::new_v4(),
        &requested,
        &scope_set(&["users:read"]),
        3600,
        Some(future),
    )
    .unwrap();

    assert!(principal_from_token(&keys, &signed.token).is_none());
}

#[test]
fn foreign_key_token_yields_no_principal() {
    let keys = KeyMaterial::generate().unwrap();
    let other_keys = KeyMaterial::generate().unwrap();
    let token = issue(&other_keys, Uuid::new_v4(), &["users:read"], 3600);

    assert!(principal_from_token(&keys, &token).is_none());
}

#[test]
fn garbage_token_yields_no_principal() {
    let keys = KeyMaterial::generate().unwrap();

    assert!(principal_from_token(&keys, "").is_none());
    assert!(principal_from_token(&keys, "not-a-jwt").is_none());
    assert!(principal_from_token(&keys, "a.b.c").is_none());
}
