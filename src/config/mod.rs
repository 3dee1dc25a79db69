//! Configuration for the Taskshelf API.
//!
//! Everything is loaded from environment variables by the
//! `taskshelf-config` crate; see each type for variable names and defaults.

pub use taskshelf_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig, env_flag};
