//! Todo seeding.

use fake::faker::lorem::en::{Sentence, Words};
use fake::{Fake, Faker};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::TodoSeed;

pub fn generate_todos(owner_ids: &[i32], per_user: usize) -> Vec<TodoSeed> {
    owner_ids
        .par_iter()
        .flat_map(|&owner_id| {
            (0..per_user)
                .map(|_| {
                    let words: Vec<String> = Words(2..5).fake();
                    let description: String = Sentence(3..8).fake();

                    TodoSeed {
                        title: truncate(capitalize(&words.join(" ")), 3, 255),
                        description: truncate(description, 3, 100),
                        priority: (1..6).fake::<i32>(),
                        complete: Faker.fake::<bool>(),
                        owner_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: String, min: usize, max: usize) -> String {
    let text: String = text.chars().take(max).collect();
    if text.chars().count() < min {
        format!("{:_<width$}", text, width = min)
    } else {
        text
    }
}

pub async fn seed_todos(
    db: &PgPool,
    owner_ids: &[i32],
    per_user: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("\n📝 Seeding {} todos...", owner_ids.len() * per_user);

    let todos = generate_todos(owner_ids, per_user);

    let mut tx = db.begin().await?;

    // 5 params per todo
    const BATCH_SIZE: usize = 1000;

    for chunk in todos.chunks(BATCH_SIZE) {
        insert_todos_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} todos in {:?}",
        todos.len(),
        start_time.elapsed()
    );

    Ok(todos.len())
}

async fn insert_todos_chunk(
    tx: &mut Transaction<'_, Postgres>,
    todos: &[TodoSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if todos.is_empty() {
        return Ok(());
    }

    let mut query =
        String::from("INSERT INTO todos (title, description, priority, complete, owner_id) VALUES ");

    for i in 0..todos.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5
        ));
    }

    let mut q = sqlx::query(&query);
    for todo in todos {
        q = q
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.priority)
            .bind(todo.complete)
            .bind(todo.owner_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}
