//! # Lectern Auth
//!
//! The cryptographic core of the Lectern authentication subsystem. This crate
//! is pure: no HTTP, no database, no I/O beyond the system RNG.
//!
//! - [`keys`]: process-lifetime RSA signing keypair and JWKS export
//! - [`claims`]: access token claim structure
//! - [`codec`]: signed token encoding/decoding (RS256)
//! - [`issuer`]: access token issuance with scope containment, opaque
//!   refresh token generation
//! - [`introspect`]: token validity checks with uniform failure collapse
//!
//! # Token model
//!
//! Access tokens are short-lived, self-verifying JWTs; they are never
//! persisted. Refresh tokens are opaque random strings whose state lives in
//! the caller's store. The signing keypair is generated once at process start
//! and never leaves [`keys::KeyMaterial`].
//!
//! # Example
//!
//! ```ignore
//! use lectern_auth::{KeyMaterial, issue_access_token};
//!
//! let keys = KeyMaterial::generate()?;
//! let signed = issue_access_token(&keys, user_id, &requested, &granted, 3600, None)?;
//! let check = lectern_auth::introspect::check(&keys, &signed.token, chrono::Utc::now());
//! assert!(check.active);
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod introspect;
pub mod issuer;
pub mod keys;

// Re-export commonly used types at crate root
pub use claims::AccessTokenClaims;
pub use error::TokenError;
pub use introspect::Introspection;
pub use issuer::{SignedAccessToken, generate_refresh_token, issue_access_token};
pub use keys::{Jwk, Jwks, KeyMaterial};
