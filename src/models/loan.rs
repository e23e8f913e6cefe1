//! Loan model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;
use utoipa::ToSchema;

/// Loan lifecycle status. A loan transitions OPEN -> CLOSE exactly once;
/// closing is the logical deletion of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    Open,
    Close,
}

impl LoanStatus {
    /// Text form stored in the status column
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Open => "OPEN",
            LoanStatus::Close => "CLOSE",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(LoanStatus::Open),
            "CLOSE" => Some(LoanStatus::Close),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loan row from database. The surrogate id replaces the historical
/// (book, customer, creation timestamp) composite key; uniqueness of the
/// open loan per pair is enforced by a partial index.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub customer_id: i32,
    pub creation_date_time: DateTime<Utc>,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl Loan {
    pub fn status(&self) -> Option<LoanStatus> {
        LoanStatus::from_str(&self.status)
    }
}

/// Request body for creating or closing a loan
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleLoanRequest {
    pub book_id: i32,
    pub customer_id: i32,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Book subset carried by a loan DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanBookDto {
    pub id: i32,
    pub isbn: String,
    pub title: String,
}

/// Customer subset carried by a loan DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanCustomerDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Reduced loan representation returned by the list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    pub book: LoanBookDto,
    pub customer: LoanCustomerDto,
    pub loan_begin_date: NaiveDate,
    pub loan_end_date: NaiveDate,
}

/// Natural ordering: begin date first, then end date, then book id. The
/// remaining fields act as tie-breakers so the ordering stays consistent
/// with equality.
impl Ord for LoanDto {
    fn cmp(&self, other: &Self) -> Ordering {
        self.loan_begin_date
            .cmp(&other.loan_begin_date)
            .then_with(|| self.loan_end_date.cmp(&other.loan_end_date))
            .then_with(|| self.book.id.cmp(&other.book.id))
            .then_with(|| self.customer.id.cmp(&other.customer.id))
            .then_with(|| self.book.isbn.cmp(&other.book.isbn))
            .then_with(|| self.book.title.cmp(&other.book.title))
            .then_with(|| self.customer.last_name.cmp(&other.customer.last_name))
            .then_with(|| self.customer.first_name.cmp(&other.customer.first_name))
            .then_with(|| self.customer.email.cmp(&other.customer.email))
    }
}

impl PartialOrd for LoanDto {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Joined row backing a loan DTO (loan + book + customer subsets)
#[derive(Debug, Clone, FromRow)]
pub struct LoanDetailsRow {
    pub book_id: i32,
    pub isbn: String,
    pub title: String,
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanDto {
    /// Map a joined loan row to the reduced DTO, field by field
    pub fn from_row(row: LoanDetailsRow) -> Self {
        Self {
            book: LoanBookDto {
                id: row.book_id,
                isbn: row.isbn,
                title: row.title,
            },
            customer: LoanCustomerDto {
                id: row.customer_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            },
            loan_begin_date: row.begin_date,
            loan_end_date: row.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(begin: NaiveDate, end: NaiveDate, book_id: i32) -> LoanDto {
        LoanDto {
            book: LoanBookDto {
                id: book_id,
                isbn: format!("isbn-{}", book_id),
                title: format!("book-{}", book_id),
            },
            customer: LoanCustomerDto {
                id: 1,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.org".to_string(),
            },
            loan_begin_date: begin,
            loan_end_date: end,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!(LoanStatus::from_str("OPEN"), Some(LoanStatus::Open));
        assert_eq!(LoanStatus::from_str("CLOSE"), Some(LoanStatus::Close));
        assert_eq!(LoanStatus::from_str("open"), None);
        assert_eq!(LoanStatus::Open.as_str(), "OPEN");
    }

    #[test]
    fn natural_ordering_sorts_by_begin_date_first() {
        let mut loans = vec![
            dto(day(10), day(20), 1),
            dto(day(5), day(25), 2),
            dto(day(5), day(15), 3),
        ];
        loans.sort();
        assert_eq!(loans[0].book.id, 3);
        assert_eq!(loans[1].book.id, 2);
        assert_eq!(loans[2].book.id, 1);
    }

    #[test]
    fn ordering_falls_back_to_book_id() {
        let a = dto(day(1), day(2), 4);
        let b = dto(day(1), day(2), 9);
        assert!(a < b);
    }

    #[test]
    fn ordering_is_consistent_with_equality() {
        let a = dto(day(1), day(2), 4);
        let mut b = a.clone();
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);

        // Same ordering prefix, different customer: not Equal anymore
        b.customer.email = "other@example.org".to_string();
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn loan_request_parses_camel_case() {
        let req: SimpleLoanRequest = serde_json::from_value(serde_json::json!({
            "bookId": 1,
            "customerId": 2,
            "beginDate": "2024-01-05",
            "endDate": "2024-02-05"
        }))
        .unwrap();
        assert_eq!(req.book_id, 1);
        assert_eq!(req.customer_id, 2);
        assert_eq!(req.begin_date, day(5));
    }
}
