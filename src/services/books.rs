//! Book management service

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, category::Category},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Insert a book, or overwrite the record with the same id. The
    /// referenced category must exist.
    pub async fn save_book(&self, book: Book) -> AppResult<Book> {
        self.ensure_category_exists(&book.category_code).await?;

        self.repository
            .books
            .save(&book)
            .await?
            .ok_or_else(|| AppError::NotModified("Book was not persisted".to_string()))
    }

    /// Update is a full save; existence of the id is checked by the handler
    pub async fn update_book(&self, book: Book) -> AppResult<Book> {
        self.save_book(book).await
    }

    /// Delete a book by id, no-op when absent
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete_by_id(id).await
    }

    /// Check whether a book with the given id exists
    pub async fn check_if_id_exists(&self, id: i32) -> AppResult<bool> {
        self.repository.books.exists_by_id(id).await
    }

    /// Find books whose title contains the given fragment, case-insensitive
    pub async fn find_books_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", title);
        self.repository.books.find_by_title_like(&pattern).await
    }

    /// Find the single book with the given ISBN, case-insensitive
    pub async fn find_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.repository.books.find_by_isbn(isbn).await
    }

    /// Find all books belonging to a category
    pub async fn find_books_by_category(&self, code: &str) -> AppResult<Vec<Book>> {
        self.repository.books.find_by_category_code(code).await
    }

    /// List all categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    async fn ensure_category_exists(&self, code: &str) -> AppResult<()> {
        self.repository
            .categories
            .find_by_code(code)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::Validation(format!("Unknown category code '{}'", code)))
    }
}
