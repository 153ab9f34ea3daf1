//! Error type for token operations.

/// Errors raised by key generation, token issuance, and verification.
///
/// All verification failures collapse into the single [`TokenError::Verification`]
/// variant: callers must not be able to distinguish a bad signature from a
/// malformed token, so no decode detail is carried.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// A requested scope is outside the identity's effective authorities.
    #[error("requested scope is not granted: {0}")]
    ScopeNotGranted(String),

    /// Token issuance was attempted with an empty scope set.
    #[error("no scopes requested")]
    EmptyScopes,

    /// Signature or format failure during decode. Intentionally detail-free.
    #[error("token verification failed")]
    Verification,

    /// Failed to encode and sign a token.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// Failed to generate the signing keypair. Fatal at startup.
    #[error("signing key generation failed: {0}")]
    KeyGeneration(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        Self::Verification
    }
}
