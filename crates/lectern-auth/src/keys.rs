//! Process-lifetime signing key material.
//!
//! One RSA-2048 keypair is generated at startup and lives for the process
//! lifetime. The private half never leaves this module; the public half is
//! published as a JWK set for external verifiers. There is no key rotation
//! or persistence (single-generation model).

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::sha2::{Digest, Sha256};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Static key id published in token headers and the JWK set.
pub const SIGNING_KEY_ID: &str = "lectern-signing-key";

const KEY_BITS: usize = 2048;

/// The signing keypair for this process.
///
/// Immutable after construction; sign/verify take `&self` and are safe for
/// unsynchronized concurrent use.
pub struct KeyMaterial {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for KeyMaterial {
    // Never expose key bytes through Debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kid", &SIGNING_KEY_ID)
            .finish_non_exhaustive()
    }
}

impl KeyMaterial {
    /// Generates a fresh RSA-2048 keypair.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::KeyGeneration`] if generation or PEM encoding
    /// fails. The caller is expected to treat this as fatal: the process
    /// must not serve traffic without key material.
    pub fn generate() -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::new(&mut OsRng, KEY_BITS)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;
        let public_key = private_key.to_public_key();

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;
        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;

        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;

        Ok(Self {
            private_key,
            public_key,
            encoding_key,
            decoding_key,
        })
    }

    pub fn kid(&self) -> &'static str {
        SIGNING_KEY_ID
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Signs arbitrary bytes with the private key (PKCS#1 v1.5, SHA-256).
    pub fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, TokenError> {
        let digest = Sha256::digest(bytes);
        self.private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies a signature produced by [`KeyMaterial::sign`].
    pub fn verify(&self, bytes: &[u8], signature: &[u8]) -> bool {
        let digest = Sha256::digest(bytes);
        self.public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
            .is_ok()
    }

    /// Exports the public key as a JWK set for the verification key endpoint.
    pub fn jwks(&self) -> Jwks {
        let n = self.public_key.n().to_bytes_be();
        let e = self.public_key.e().to_bytes_be();

        Jwks {
            keys: vec![Jwk {
                kty: "RSA".to_string(),
                kid: SIGNING_KEY_ID.to_string(),
                use_: "sig".to_string(),
                alg: "RS256".to_string(),
                n: URL_SAFE_NO_PAD.encode(n),
                e: URL_SAFE_NO_PAD.encode(e),
            }],
        }
    }
}

/// JSON Web Key Set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key (RSA public half only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub use_: String,
    pub alg: String,
    /// RSA modulus, base64url encoded.
    pub n: String,
    /// RSA exponent, base64url encoded.
    pub e: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let keys = KeyMaterial::generate().unwrap();
        let signature = keys.sign(b"payload under test").unwrap();

        assert!(keys.verify(b"payload under test", &signature));
        assert!(!keys.verify(b"a different payload", &signature));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let keys = KeyMaterial::generate().unwrap();
        let other = KeyMaterial::generate().unwrap();

        let signature = other.sign(b"payload").unwrap();
        assert!(!keys.verify(b"payload", &signature));
    }

    #[test]
    fn test_jwks_export() {
        let keys = KeyMaterial::generate().unwrap();
        let jwks = keys.jwks();

        assert_eq!(jwks.keys.len(), 1);
        let jwk = &jwks.keys[0];
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, SIGNING_KEY_ID);
        assert_eq!(jwk.use_, "sig");
        assert_eq!(jwk.alg, "RS256");
        assert!(!jwk.n.is_empty());
        assert!(!jwk.e.is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_key_bytes() {
        let keys = KeyMaterial::generate().unwrap();
        let rendered = format!("{:?}", keys);
        assert!(rendered.contains(SIGNING_KEY_ID));
        assert!(!rendered.contains("private"));
    }
}
