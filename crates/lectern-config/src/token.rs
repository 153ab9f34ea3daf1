use std::env;

/// Token lifetime configuration.
///
/// Access tokens are short-lived and self-verifying; refresh tokens are
/// long-lived opaque strings persisted server-side. Both lifetimes are
/// expressed in seconds.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub access_token_lifetime: i64,
    pub refresh_token_lifetime: i64,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        Self {
            access_token_lifetime: env::var("ACCESS_TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_lifetime: env::var("REFRESH_TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}
