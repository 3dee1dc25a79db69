//! User seeding.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use taskshelf_models::users::roles;

use super::SEED_EMAIL_DOMAIN;
use super::models::UserSeed;

/// Generates `count` users numbered from `offset`, so repeated runs do not
/// collide on email or username.
pub fn generate_users(count: usize, offset: i64, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let serial = offset + idx as i64;
            let handle = format!("{}.{}", slug(&first_name), slug(&last_name));

            UserSeed {
                email: format!("{}+{}@{}", handle, serial, SEED_EMAIL_DOMAIN),
                username: format!("{}{}", handle, serial),
                first_name: pad_name(first_name),
                last_name: pad_name(last_name),
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

// Registration requires at least three characters.
fn pad_name(name: String) -> String {
    if name.chars().count() >= 3 {
        name
    } else {
        format!("{:_<3}", name)
    }
}

pub async fn seed_users(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("\n👥 Seeding {} users...", count);

    let offset: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0)::BIGINT FROM users")
        .fetch_one(db)
        .await?;

    let users = generate_users(count, offset + 1, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 6 params per user
    const BATCH_SIZE: usize = 1000;

    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO users (email, username, first_name, last_name, hashed_password, role) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, i32>(&query);
    for user in users {
        q = q
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(roles::USER);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Deletes every user on the seed email domain.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(pattern)
        .execute(db)
        .await?
        .rows_affected();

    Ok(deleted)
}
