//! Seed data and seeding configuration.

pub struct UserSeed {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

pub struct TodoSeed {
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
    pub owner_id: i32,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub users: usize,
    pub todos_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 20,
            todos_per_user: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn with_todos_per_user(mut self, todos_per_user: usize) -> Self {
        self.todos_per_user = todos_per_user;
        self
    }
}
