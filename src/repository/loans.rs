//! Loans repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetailsRow, LoanStatus, SimpleLoanRequest},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find the OPEN loan for a (book, customer) pair, if any. The partial
    /// unique index guarantees at most one such row.
    pub async fn find_open_by_pair(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        customer_id: i32,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loan WHERE book_id = $1 AND customer_id = $2 AND status = $3",
        )
        .bind(book_id)
        .bind(customer_id)
        .bind(LoanStatus::Open.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(loan)
    }

    /// Insert a new OPEN loan inside the given transaction. Returns the
    /// persisted row, or None when the insert produced nothing.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &SimpleLoanRequest,
        creation_date_time: DateTime<Utc>,
    ) -> AppResult<Option<Loan>> {
        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loan (book_id, customer_id, creation_date_time, begin_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(request.book_id)
        .bind(request.customer_id)
        .bind(creation_date_time)
        .bind(request.begin_date)
        .bind(request.end_date)
        .bind(LoanStatus::Open.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(created)
    }

    /// Flip an OPEN loan to CLOSE. Returns the number of rows touched so
    /// the caller can distinguish a lost race from success.
    pub async fn close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        loan_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE loan SET status = $1 WHERE id = $2 AND status = $3")
            .bind(LoanStatus::Close.as_str())
            .bind(loan_id)
            .bind(LoanStatus::Open.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    /// All loans ending strictly before the given date, joined to their
    /// book and customer
    pub async fn find_by_end_date_before(
        &self,
        max_end_date: NaiveDate,
    ) -> AppResult<Vec<LoanDetailsRow>> {
        let rows = sqlx::query_as::<_, LoanDetailsRow>(
            r#"
            SELECT b.id as book_id, b.isbn, b.title,
                   c.id as customer_id, c.first_name, c.last_name, c.email,
                   l.begin_date, l.end_date
            FROM loan l
            JOIN book b ON l.book_id = b.id
            JOIN customer c ON l.customer_id = c.id
            WHERE l.end_date < $1
            "#,
        )
        .bind(max_end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All OPEN loans of the customer with the given email, joined to their
    /// book and customer
    pub async fn find_open_by_customer_email(
        &self,
        email: &str,
    ) -> AppResult<Vec<LoanDetailsRow>> {
        let rows = sqlx::query_as::<_, LoanDetailsRow>(
            r#"
            SELECT b.id as book_id, b.isbn, b.title,
                   c.id as customer_id, c.first_name, c.last_name, c.email,
                   l.begin_date, l.end_date
            FROM loan l
            JOIN book b ON l.book_id = b.id
            JOIN customer c ON l.customer_id = c.id
            WHERE LOWER(c.email) = LOWER($1) AND l.status = $2
            "#,
        )
        .bind(email)
        .bind(LoanStatus::Open.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
