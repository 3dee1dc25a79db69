//! Database seeding with generated users and todos.
//!
//! Seeded accounts use the `@seed.taskshelf.dev` email domain so they can be
//! removed again without touching real accounts. All of them share the
//! password [`SEED_PASSWORD`].

pub mod models;
pub mod todos;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;

pub use models::SeedConfig;

pub const SEED_EMAIL_DOMAIN: &str = "seed.taskshelf.dev";
pub const SEED_PASSWORD: &str = "password123";

/// Seeds users and their todos in one run.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Users: {}", config.users);
    println!("   - Todos per user: {}", config.todos_per_user);

    // Low cost keeps seeding fast; every seeded user shares this one hash.
    println!("\n🔐 Hashing password...");
    let hash_start = Instant::now();
    let password_hash =
        bcrypt::hash(SEED_PASSWORD, 4).map_err(|e| format!("Failed to hash password: {}", e))?;
    println!("   ✓ Hashed password in {:?}", hash_start.elapsed());

    let user_ids = users::seed_users(db, config.users, &password_hash).await?;
    let todo_count = todos::seed_todos(db, &user_ids, config.todos_per_user).await?;

    println!(
        "\n✅ Seeding complete! Created {} users and {} todos in {:?}",
        user_ids.len(),
        todo_count,
        start_time.elapsed()
    );

    Ok(())
}

/// Removes seeded users; their todos go with them.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let deleted = users::clear_users(db).await?;

    println!(
        "\n✅ Cleared {} seeded users (and their todos) in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
