use std::sync::Arc;

use taskshelf_models::books::{Book, seed_books};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared in-memory book catalogue. Clones share the same list.
#[derive(Clone, Debug, Default)]
pub struct BookStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BookStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_books())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<Book>> {
        self.books.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<Book>> {
        self.books.write().await
    }
}
