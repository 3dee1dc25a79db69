//! # Taskshelf Core
//!
//! Core types and utilities shared by every Taskshelf crate.
//!
//! - [`errors`]: the application error type and the JSON error envelope
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use taskshelf_core::errors::AppError;
//! use taskshelf_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Todo Not Found.");
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorDetail, ErrorEnvelope, ErrorKind};
pub use password::{hash_password, verify_password};
