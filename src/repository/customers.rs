//! Customers repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerDto},
};

/// LIMIT/OFFSET for a begin/end page window. `end_page` doubles as the
/// page size, matching the original begin/end page request contract.
/// None when the window overflows.
fn page_window(begin_page: i64, end_page: i64) -> Option<(i64, i64)> {
    let limit = end_page.max(0);
    let offset = begin_page.max(0).checked_mul(limit)?;
    Some((limit, offset))
}

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a customer by id
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Check whether a customer with the given id exists
    pub async fn exists_by_id(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Find the customer with the given email, exact match, case-insensitive
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    /// Same email lookup inside an explicit transaction scope
    pub async fn find_by_email_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> AppResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(customer)
    }

    /// Find customers whose last name contains the given pattern,
    /// case-insensitive. The caller adds the LIKE wildcards.
    pub async fn find_by_last_name_like(&self, pattern: &str) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customer WHERE LOWER(last_name) LIKE LOWER($1) ORDER BY last_name, first_name",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Page window over all customers
    pub async fn paginated(&self, begin_page: i64, end_page: i64) -> AppResult<Vec<Customer>> {
        let (limit, offset) = page_window(begin_page, end_page)
            .ok_or_else(|| AppError::BadRequest("Page window out of range".to_string()))?;

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customer ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Insert a new customer inside the given transaction. Returns the
    /// persisted row, or None when the insert produced nothing.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: &CustomerDto,
        creation_date: NaiveDate,
    ) -> AppResult<Option<Customer>> {
        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer (first_name, last_name, job, address, email, creation_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.job)
        .bind(&customer.address)
        .bind(&customer.email)
        .bind(creation_date)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(created)
    }

    /// Full-object replacement of an existing customer inside the given
    /// transaction. The creation date is never touched by updates.
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        customer: &CustomerDto,
    ) -> AppResult<Option<Customer>> {
        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customer
            SET first_name = $1, last_name = $2, job = $3, address = $4, email = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.job)
        .bind(&customer.address)
        .bind(&customer.email)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(updated)
    }

    /// Delete a customer by id, no-op when absent
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
