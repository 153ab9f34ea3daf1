//! Signed access token encoding and decoding.
//!
//! Pure and stateless. Decoding verifies the RS256 signature before any
//! embedded claim is trusted; the validity window is deliberately NOT
//! checked here so that introspection can report an expired token as
//! inactive through the same uniform path as a forged one. Window checks
//! live in [`crate::introspect`] with zero clock-skew leeway.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, Header, Validation};

use crate::claims::AccessTokenClaims;
use crate::error::TokenError;
use crate::keys::KeyMaterial;

/// Serializes and signs claims into the three-part compact form.
pub fn encode(keys: &KeyMaterial, claims: &AccessTokenClaims) -> Result<String, TokenError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(keys.kid().to_string());

    jsonwebtoken::encode(&header, claims, keys.encoding_key())
        .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies the signature and parses the claims.
///
/// # Errors
///
/// Returns [`TokenError::Verification`] for any signature or format
/// failure, with no further detail.
pub fn decode(keys: &KeyMaterial, token: &str) -> Result<AccessTokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = jsonwebtoken::decode::<AccessTokenClaims>(token, keys.decoding_key(), &validation)?;
    Ok(data.claims)
}
