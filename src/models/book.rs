//! Book model and DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub release_date: NaiveDate,
    pub register_date: NaiveDate,
    pub total_copies: Option<i32>,
    pub author: Option<String>,
    pub category_code: String,
}

/// Book at the API boundary. The id is supplied by the caller, not
/// generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub isbn: String,
    pub release_date: NaiveDate,
    pub register_date: NaiveDate,
    pub total_copies: Option<i32>,
    pub author: Option<String>,
    #[validate(length(min = 1))]
    pub category_code: String,
}

impl BookDto {
    /// Map a book entity to its DTO, field by field
    pub fn from_entity(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            isbn: book.isbn,
            release_date: book.release_date,
            register_date: book.register_date,
            total_copies: book.total_copies,
            author: book.author,
            category_code: book.category_code,
        }
    }

    /// Map the DTO back to a persistable entity
    pub fn into_entity(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            isbn: self.isbn,
            release_date: self.release_date,
            register_date: self.register_date,
            total_copies: self.total_copies,
            author: self.author,
            category_code: self.category_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: 7,
            title: "The Name of the Rose".to_string(),
            isbn: "978-0-15-144647-6".to_string(),
            release_date: NaiveDate::from_ymd_opt(1980, 10, 1).unwrap(),
            register_date: NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            total_copies: Some(4),
            author: Some("Umberto Eco".to_string()),
            category_code: "NOV".to_string(),
        }
    }

    #[test]
    fn dto_round_trip_preserves_all_fields() {
        let book = sample_book();
        let entity = BookDto::from_entity(book.clone()).into_entity();
        assert_eq!(entity.id, book.id);
        assert_eq!(entity.isbn, book.isbn);
        assert_eq!(entity.title, book.title);
        assert_eq!(entity.category_code, book.category_code);
        assert_eq!(entity.total_copies, book.total_copies);
    }

    #[test]
    fn dto_serializes_camel_case() {
        let dto = BookDto::from_entity(sample_book());
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("categoryCode").is_some());
        assert!(json.get("releaseDate").is_some());
        assert!(json.get("category_code").is_none());
    }

    #[test]
    fn empty_title_fails_validation() {
        let mut dto = BookDto::from_entity(sample_book());
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }
}
