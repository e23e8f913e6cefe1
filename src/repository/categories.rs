//! Categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::category::Category};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a category by its code
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT code, label FROM category WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT code, label FROM category ORDER BY code")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }
}
