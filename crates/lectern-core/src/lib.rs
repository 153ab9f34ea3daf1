//! # Lectern Core
//!
//! Shared foundation types for the Lectern API:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use lectern_core::AppError;
//! use lectern_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let err = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
