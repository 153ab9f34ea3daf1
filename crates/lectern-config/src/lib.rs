//! # Lectern Config
//!
//! Configuration types for the Lectern API, loaded from environment variables:
//!
//! - [`token`]: access/refresh token lifetimes
//! - [`reclaimer`]: cron schedule for the refresh token reclaimer
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) allowed origins
//!
//! # Example
//!
//! ```ignore
//! use lectern_config::{TokenConfig, ReclaimerConfig, CorsConfig};
//!
//! let token_config = TokenConfig::from_env();
//! let reclaimer_config = ReclaimerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod reclaimer;
pub mod token;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use reclaimer::ReclaimerConfig;
pub use token::TokenConfig;
