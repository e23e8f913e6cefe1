//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::book::Book};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a book by its id
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM book WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    /// Check whether a book with the given id exists
    pub async fn exists_by_id(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Insert a book, or replace the full record when the id already exists
    pub async fn save(&self, book: &Book) -> AppResult<Option<Book>> {
        let saved = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (id, title, isbn, release_date, register_date, total_copies, author, category_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                isbn = EXCLUDED.isbn,
                release_date = EXCLUDED.release_date,
                register_date = EXCLUDED.register_date,
                total_copies = EXCLUDED.total_copies,
                author = EXCLUDED.author,
                category_code = EXCLUDED.category_code
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.release_date)
        .bind(book.register_date)
        .bind(book.total_copies)
        .bind(&book.author)
        .bind(&book.category_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Delete a book by id, no-op when absent
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Find books whose title contains the given pattern, case-insensitive.
    /// The caller is expected to have added the LIKE wildcards.
    pub async fn find_by_title_like(&self, pattern: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM book WHERE LOWER(title) LIKE LOWER($1) ORDER BY title",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Find the single book with the given ISBN, case-insensitive
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book =
            sqlx::query_as::<_, Book>("SELECT * FROM book WHERE LOWER(isbn) = LOWER($1)")
                .bind(isbn)
                .fetch_optional(&self.pool)
                .await?;

        Ok(book)
    }

    /// Find all books belonging to a category
    pub async fn find_by_category_code(&self, code: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM book WHERE category_code = $1 ORDER BY title",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}
