//! Book category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Category row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub code: String,
    pub label: String,
}

/// Category at the API boundary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub code: String,
    pub label: String,
}

impl CategoryDto {
    /// Map a category entity to its DTO
    pub fn from_entity(category: Category) -> Self {
        Self {
            code: category.code,
            label: category.label,
        }
    }
}
