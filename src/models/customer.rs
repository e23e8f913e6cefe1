//! Customer model and DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Customer row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub job: Option<String>,
    pub address: Option<String>,
    pub email: String,
    pub creation_date: NaiveDate,
}

/// Customer at the API boundary. The id is absent on creation and the
/// creation date is stamped server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Option<i32>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub job: Option<String>,
    pub address: Option<String>,
    #[validate(email)]
    pub email: String,
    pub creation_date: Option<NaiveDate>,
}

impl CustomerDto {
    /// Map a customer entity to its DTO, field by field
    pub fn from_entity(customer: Customer) -> Self {
        Self {
            id: Some(customer.id),
            first_name: customer.first_name,
            last_name: customer.last_name,
            job: customer.job,
            address: customer.address,
            email: customer.email,
            creation_date: Some(customer.creation_date),
        }
    }
}

/// Request body for the customer mail endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailRequest {
    pub customer_id: i32,
    pub email_subject: String,
    pub email_content: String,
}
