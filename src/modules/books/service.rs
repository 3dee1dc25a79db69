use taskshelf_core::AppError;
use taskshelf_models::books::{Book, BookFilterParams, BookRequest, BookUpdateRequest};
use tracing::{debug, info, instrument};

use crate::metrics::track_book_operation;

use super::store::BookStore;

pub const NO_BOOKS_MESSAGE: &str = "No books present in the Database";

fn ensure_not_empty(books: &[Book]) -> Result<(), AppError> {
    if books.is_empty() {
        Err(AppError::not_found(NO_BOOKS_MESSAGE))
    } else {
        Ok(())
    }
}

fn by_author<'a>(books: impl IntoIterator<Item = &'a Book>, author: &str) -> Vec<&'a Book> {
    books
        .into_iter()
        .filter(|book| book.author.eq_ignore_ascii_case(author))
        .collect()
}

fn by_title<'a>(books: impl IntoIterator<Item = &'a Book>, title: &str) -> Vec<&'a Book> {
    books
        .into_iter()
        .filter(|book| book.title.eq_ignore_ascii_case(title))
        .collect()
}

fn author_not_found(author: &str) -> AppError {
    AppError::not_found(format!("No books found for author - {author}"))
}

fn title_not_found(title: &str) -> AppError {
    AppError::not_found(format!("No book found with title - {title}"))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Applies each present filter in turn. Empty text filters are ignored. The first filter that leaves
/// nothing decides the 404 message.
pub fn filter_books(books: &[Book], params: &BookFilterParams) -> Result<Vec<Book>, AppError> {
    ensure_not_empty(books)?;

    let mut matches: Vec<&Book> = books.iter().collect();

    if let Some(author) = non_blank(&params.author_name) {
        matches = by_author(matches, author);
        if matches.is_empty() {
            return Err(author_not_found(author));
        }
    }

    if let Some(title) = non_blank(&params.book_title) {
        matches = by_title(matches, title);
        if matches.is_empty() {
            return Err(title_not_found(title));
        }
    }

    if let Some(rating) = params.book_rating {
        matches.retain(|book| book.rating == rating);
        if matches.is_empty() {
            return Err(AppError::not_found(format!(
                "No book found with rating - {rating}"
            )));
        }
    }

    if let Some(year) = params.published_year {
        matches.retain(|book| book.published_year == year);
        if matches.is_empty() {
            return Err(AppError::not_found(format!(
                "No book found with published year - {year}"
            )));
        }
    }

    Ok(matches.into_iter().cloned().collect())
}

/// Next free id: one past the last book's, or 0 for an empty catalogue.
pub fn next_book_id(books: &[Book]) -> u32 {
    books.last().map_or(0, |book| book.id + 1)
}

pub struct BookService;

impl BookService {
    #[instrument(skip(store))]
    pub async fn list_books(
        store: &BookStore,
        params: &BookFilterParams,
    ) -> Result<Vec<Book>, AppError> {
        let books = store.read().await;
        let matches = filter_books(&books, params)?;
        debug!(count = matches.len(), "Filtered books");
        Ok(matches)
    }

    #[instrument(skip(store))]
    pub async fn get_by_title(store: &BookStore, title: &str) -> Result<Book, AppError> {
        let books = store.read().await;
        ensure_not_empty(&books)?;

        by_title(books.iter(), title)
            .first()
            .map(|book| (*book).clone())
            .ok_or_else(|| title_not_found(title))
    }

    #[instrument(skip(store))]
    pub async fn get_by_id(store: &BookStore, book_id: u32) -> Result<Book, AppError> {
        let books = store.read().await;
        ensure_not_empty(&books)?;

        books
            .iter()
            .find(|book| book.id == book_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No book found with ID - '{book_id}'")))
    }

    #[instrument(skip(store))]
    pub async fn get_by_author(store: &BookStore, author: &str) -> Result<Vec<Book>, AppError> {
        let books = store.read().await;
        ensure_not_empty(&books)?;

        let matches = by_author(books.iter(), author);
        if matches.is_empty() {
            return Err(author_not_found(author));
        }

        Ok(matches.into_iter().cloned().collect())
    }

    #[instrument(skip(store, request))]
    pub async fn add_book(store: &BookStore, request: BookRequest) -> Book {
        let mut books = store.write().await;
        let book = request.into_book(next_book_id(&books));
        books.push(book.clone());

        track_book_operation("create");
        info!(book.id = %book.id, "Book added");
        book
    }

    #[instrument(skip(store, request), fields(book.id = %request.id))]
    pub async fn update_book(store: &BookStore, request: BookUpdateRequest) -> Result<(), AppError> {
        let mut books = store.write().await;
        ensure_not_empty(&books)?;

        let id = request.id;
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::not_found(format!("No book found with ID - {id}")))?;
        *slot = request.into();

        track_book_operation("update");
        info!("Book updated");
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn delete_book(store: &BookStore, book_id: u32) -> Result<(), AppError> {
        let mut books = store.write().await;
        ensure_not_empty(&books)?;

        let index = books
            .iter()
            .position(|book| book.id == book_id)
            .ok_or_else(|| AppError::not_found(format!("No book found with ID - {book_id}")))?;
        books.remove(index);

        track_book_operation("delete");
        info!(book.id = %book_id, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use taskshelf_models::books::seed_books;

    #[test]
    fn test_filter_without_params_returns_everything() {
        let books = seed_books();
        let result = filter_books(&books, &BookFilterParams::default()).unwrap();
        assert_eq!(result.len(), books.len());
    }

    #[test]
    fn test_filter_empty_text_values_are_ignored() {
        let params = BookFilterParams {
            author_name: Some(String::new()),
            book_title: Some(String::new()),
            ..Default::default()
        };
        let result = filter_books(&seed_books(), &params).unwrap();
        assert_eq!(result.len(), 8);
    }

    #[test]
    fn test_filter_author_is_case_insensitive() {
        let params = BookFilterParams {
            author_name: Some("hermann hesse".to_string()),
            ..Default::default()
        };
        let result = filter_books(&seed_books(), &params).unwrap();
        let ids: Vec<u32> = result.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filters_combine_in_order() {
        let params = BookFilterParams {
            author_name: Some("Hermann Hesse".to_string()),
            published_year: Some(1919),
            ..Default::default()
        };
        let result = filter_books(&seed_books(), &params).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Demian");
    }

    #[test]
    fn test_first_emptying_filter_sets_message() {
        let params = BookFilterParams {
            author_name: Some("James Clear".to_string()),
            book_rating: Some(1),
            published_year: Some(1900),
            ..Default::default()
        };
        let err = filter_books(&seed_books(), &params).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "No book found with rating - 1");
    }

    #[test]
    fn test_filter_empty_catalogue() {
        let err = filter_books(&[], &BookFilterParams::default()).unwrap_err();
        assert_eq!(err.message(), NO_BOOKS_MESSAGE);
    }

    #[test]
    fn test_next_book_id() {
        assert_eq!(next_book_id(&[]), 0);
        assert_eq!(next_book_id(&seed_books()), 8);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_fails() {
        let store = BookStore::seeded();
        BookService::delete_book(&store, 6).await.unwrap();

        let err = BookService::get_by_id(&store, 6).await.unwrap_err();
        assert_eq!(err.message(), "No book found with ID - '6'");
    }

    #[tokio::test]
    async fn test_operations_on_empty_store() {
        let store = BookStore::new(Vec::new());

        let err = BookService::delete_book(&store, 0).await.unwrap_err();
        assert_eq!(err.message(), NO_BOOKS_MESSAGE);

        let err = BookService::get_by_author(&store, "John Scalzi").await.unwrap_err();
        assert_eq!(err.message(), NO_BOOKS_MESSAGE);
    }
}
