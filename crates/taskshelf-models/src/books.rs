//! Book catalogue models.
//!
//! Books are kept in memory only; [`seed_books`] is the catalogue a fresh
//! process starts with.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub book_description: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub rating: u8,
}

/// Body of `POST /books`. Any client-supplied `id` is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Vagabond",
    "book_description": "A fictionalized account of the life of the swordsman Musashi Miyamoto.",
    "author": "Takehiko Inoue",
    "published_year": 1998,
    "genre": "Seinen manga, Jidaigeki",
    "rating": 5
}))]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<u32>,
    #[validate(length(min = 3, max = 200, message = "title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 3,
        max = 500,
        message = "book_description must be between 3 and 500 characters"
    ))]
    pub book_description: String,
    #[validate(length(min = 3, max = 100, message = "author must be between 3 and 100 characters"))]
    pub author: String,
    #[validate(
        range(min = 1001, message = "published_year must be greater than 1000"),
        custom(function = "crate::validate_not_future_year")
    )]
    pub published_year: i32,
    #[validate(length(min = 3, max = 50, message = "genre must be between 3 and 50 characters"))]
    pub genre: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
}

impl BookRequest {
    pub fn into_book(self, id: u32) -> Book {
        Book {
            id,
            title: self.title,
            book_description: self.book_description,
            author: self.author,
            published_year: self.published_year,
            genre: self.genre,
            rating: self.rating,
        }
    }
}

/// Body of `PUT /books`; `id` selects the book to replace.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookUpdateRequest {
    pub id: u32,
    #[validate(length(min = 3, max = 200, message = "title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 3,
        max = 500,
        message = "book_description must be between 3 and 500 characters"
    ))]
    pub book_description: String,
    #[validate(length(min = 3, max = 100, message = "author must be between 3 and 100 characters"))]
    pub author: String,
    #[validate(
        range(min = 1001, message = "published_year must be greater than 1000"),
        custom(function = "crate::validate_not_future_year")
    )]
    pub published_year: i32,
    #[validate(length(min = 3, max = 50, message = "genre must be between 3 and 50 characters"))]
    pub genre: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
}

impl From<BookUpdateRequest> for Book {
    fn from(request: BookUpdateRequest) -> Self {
        Book {
            id: request.id,
            title: request.title,
            book_description: request.book_description,
            author: request.author,
            published_year: request.published_year,
            genre: request.genre,
            rating: request.rating,
        }
    }
}

/// Optional filters for `GET /books`, applied in declaration order.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookFilterParams {
    pub author_name: Option<String>,
    pub book_title: Option<String>,
    #[validate(range(min = 1, max = 5, message = "book_rating must be between 1 and 5"))]
    pub book_rating: Option<u8>,
    #[validate(
        range(min = 1001, message = "published_year must be greater than 1000"),
        custom(function = "crate::validate_not_future_year")
    )]
    pub published_year: Option<i32>,
}

fn book(
    id: u32,
    title: &str,
    author: &str,
    published_year: i32,
    genre: &str,
    rating: u8,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        book_description: format!("Description{id}"),
        author: author.to_string(),
        published_year,
        genre: genre.to_string(),
        rating,
    }
}

pub fn seed_books() -> Vec<Book> {
    vec![
        book(0, "Mindset: The New Psychology of Success", "Carol S. Dweck", 2006, "Self-help book", 4),
        book(1, "Siddhartha", "Hermann Hesse", 1922, "Novel, Fiction", 3),
        book(2, "Demian", "Hermann Hesse", 1919, "Novel, Fiction, Künstlerroman", 3),
        book(3, "Steppenwolf", "Hermann Hesse", 1927, "Novel, Autobiography, Existential Fiction", 3),
        book(
            4,
            "Ikigai: The Japanese Secret to a Long and Happy Life",
            "Hector Garcia, Francesc Miralles",
            2016,
            "Self-help book",
            4,
        ),
        book(
            5,
            "The Psychology of Money: Timeless Lessons on Wealth, Greed, and Happiness",
            "Morgan Housel",
            2020,
            "Self-help book",
            4,
        ),
        book(6, "Atomic Habits", "James Clear", 2018, "Self-help book", 5),
        book(7, "The Kaiju Preservation Society", "John Scalzi", 2022, "Science fiction", 3),
    ]
}
