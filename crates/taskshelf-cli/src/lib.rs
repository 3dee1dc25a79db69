//! # Taskshelf CLI
//!
//! Administrative helpers and database seeding for development.
//!
//! ```ignore
//! use taskshelf_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50).with_todos_per_user(10);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
