//! Customer management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerDto},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a customer by id
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        self.repository.customers.find_by_id(id).await
    }

    /// Find the customer with the given email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        self.repository.customers.find_by_email(email).await
    }

    /// Find customers whose last name contains the given fragment
    pub async fn find_by_last_name(&self, last_name: &str) -> AppResult<Vec<Customer>> {
        let pattern = format!("%{}%", last_name);
        self.repository
            .customers
            .find_by_last_name_like(&pattern)
            .await
    }

    /// Page window over all customers
    pub async fn paginated_list(&self, begin_page: i64, end_page: i64) -> AppResult<Vec<Customer>> {
        self.repository.customers.paginated(begin_page, end_page).await
    }

    /// Create a customer. The email must not already be registered; the
    /// creation date is stamped to today. Pre-check and insert share one
    /// transaction.
    pub async fn create_customer(&self, customer: CustomerDto) -> AppResult<Customer> {
        let mut tx = self.repository.pool.begin().await?;

        if self
            .repository
            .customers
            .find_by_email_tx(&mut tx, &customer.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Customer with email {} already exists",
                customer.email
            )));
        }

        let today = Utc::now().date_naive();
        let created = self
            .repository
            .customers
            .create(&mut tx, &customer, today)
            .await?;

        tx.commit().await?;

        created.ok_or_else(|| AppError::NotModified("Customer was not persisted".to_string()))
    }

    /// Full-object replacement of an existing customer
    pub async fn update_customer(&self, id: i32, customer: CustomerDto) -> AppResult<Customer> {
        let mut tx = self.repository.pool.begin().await?;

        let updated = self
            .repository
            .customers
            .update(&mut tx, id, &customer)
            .await?;

        tx.commit().await?;

        updated.ok_or_else(|| AppError::NotModified("Customer was not persisted".to_string()))
    }

    /// Check whether a customer with the given id exists
    pub async fn check_if_id_exists(&self, id: i32) -> AppResult<bool> {
        self.repository.customers.exists_by_id(id).await
    }

    /// Delete a customer by id, no-op when absent
    pub async fn delete_customer(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete_by_id(id).await
    }
}
