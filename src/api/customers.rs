//! Customer management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CustomerDto, MailRequest},
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub begin_page: i64,
    pub end_page: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastNameQuery {
    pub last_name: String,
}

/// Add a new customer to the library
#[utoipa::path(
    post,
    path = "/customers/addCustomer",
    tag = "customers",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Created: the customer is successfully inserted", body = CustomerDto),
        (status = 409, description = "Conflict: the customer already exists"),
        (status = 304, description = "Not Modified: the customer is unsuccessfully inserted")
    )
)]
pub async fn add_customer(
    State(state): State<crate::AppState>,
    Json(customer): Json<CustomerDto>,
) -> AppResult<(StatusCode, Json<CustomerDto>)> {
    customer
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.customers.create_customer(customer).await?;
    Ok((StatusCode::CREATED, Json(CustomerDto::from_entity(created))))
}

/// Update an existing customer
#[utoipa::path(
    put,
    path = "/customers/updateCustomer",
    tag = "customers",
    request_body = CustomerDto,
    responses(
        (status = 200, description = "Ok: the customer is successfully updated", body = CustomerDto),
        (status = 404, description = "Not Found: the customer does not exist"),
        (status = 304, description = "Not Modified: the customer is unsuccessfully updated")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    Json(customer): Json<CustomerDto>,
) -> AppResult<Json<CustomerDto>> {
    customer
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let id = customer
        .id
        .ok_or_else(|| AppError::BadRequest("Customer id is required for update".to_string()))?;

    if !state.services.customers.check_if_id_exists(id).await? {
        return Err(AppError::NotFound(format!(
            "Customer with id {} not found",
            id
        )));
    }

    let updated = state
        .services
        .customers
        .update_customer(id, customer)
        .await?;
    Ok(Json(CustomerDto::from_entity(updated)))
}

/// Delete a customer; nothing is done when the customer does not exist
#[utoipa::path(
    delete,
    path = "/customers/deleteCustomer/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "No Content: customer successfully deleted")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List customers in a paginated way
#[utoipa::path(
    get,
    path = "/customers/paginatedSearch",
    tag = "customers",
    params(
        ("beginPage" = i64, Query, description = "First page index, zero-based"),
        ("endPage" = i64, Query, description = "Page window bound, doubles as page size")
    ),
    responses(
        (status = 200, description = "Ok: successfully listed", body = Vec<CustomerDto>),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn paginated_search(
    State(state): State<crate::AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Response> {
    let customers = state
        .services
        .customers
        .paginated_list(query.begin_page, query.end_page)
        .await?;
    if customers.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let dtos: Vec<CustomerDto> = customers.into_iter().map(CustomerDto::from_entity).collect();
    Ok(Json(dtos).into_response())
}

/// Search a customer by its email
#[utoipa::path(
    get,
    path = "/customers/searchByEmail",
    tag = "customers",
    params(
        ("email" = String, Query, description = "Exact email address")
    ),
    responses(
        (status = 200, description = "Ok: successful research", body = CustomerDto),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn search_by_email(
    State(state): State<crate::AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Response> {
    match state.services.customers.find_by_email(&query.email).await? {
        Some(customer) => Ok(Json(CustomerDto::from_entity(customer)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Search customers by last name fragment
#[utoipa::path(
    get,
    path = "/customers/searchByLastName",
    tag = "customers",
    params(
        ("lastName" = String, Query, description = "Last name fragment")
    ),
    responses(
        (status = 200, description = "Ok: successful research", body = Vec<CustomerDto>),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn search_by_last_name(
    State(state): State<crate::AppState>,
    Query(query): Query<LastNameQuery>,
) -> AppResult<Response> {
    let customers = state
        .services
        .customers
        .find_by_last_name(&query.last_name)
        .await?;
    if customers.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let dtos: Vec<CustomerDto> = customers.into_iter().map(CustomerDto::from_entity).collect();
    Ok(Json(dtos).into_response())
}

/// Send an email to a customer of the library
#[utoipa::path(
    put,
    path = "/customers/sendEmailToCustomer",
    tag = "customers",
    request_body = MailRequest,
    responses(
        (status = 200, description = "Ok: email successfully sent", body = bool),
        (status = 404, description = "Not Found: no customer found, or missing email"),
        (status = 403, description = "Forbidden: email cannot be sent")
    )
)]
pub async fn send_email_to_customer(
    State(state): State<crate::AppState>,
    Json(mail): Json<MailRequest>,
) -> AppResult<Response> {
    let Some(customer) = state
        .services
        .customers
        .find_by_id(mail.customer_id)
        .await?
    else {
        tracing::info!(
            customer_id = mail.customer_id,
            "Customer selected for sending email not found"
        );
        return Ok((StatusCode::NOT_FOUND, Json(false)).into_response());
    };

    if customer.email.trim().is_empty() {
        tracing::info!(
            customer_id = mail.customer_id,
            "No existing email for the selected customer"
        );
        return Ok((StatusCode::NOT_FOUND, Json(false)).into_response());
    }

    match state
        .services
        .email
        .send_message(&customer.email, &mail.email_subject, &mail.email_content)
        .await
    {
        Ok(()) => Ok(Json(true).into_response()),
        Err(AppError::MailDelivery(reason)) => {
            tracing::warn!(
                customer_id = mail.customer_id,
                %reason,
                "Mail gateway refused the message"
            );
            Ok((StatusCode::FORBIDDEN, Json(false)).into_response())
        }
        Err(other) => Err(other),
    }
}
