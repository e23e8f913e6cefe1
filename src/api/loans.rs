//! Loan management endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::loan::{LoanDto, SimpleLoanRequest},
    services::loans::CloseOutcome,
};

#[derive(Deserialize, ToSchema)]
pub struct MaxEndDateQuery {
    /// Upper bound, exclusive, YYYY-MM-DD
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CustomerEmailQuery {
    pub email: String,
}

/// List loans ending before the indicated date
#[utoipa::path(
    get,
    path = "/loans/maxEndDate",
    tag = "loans",
    params(
        ("date" = String, Query, description = "Maximum end date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Ok: successfully listed", body = Vec<LoanDto>)
    )
)]
pub async fn search_loans_before_date(
    State(state): State<crate::AppState>,
    Query(query): Query<MaxEndDateQuery>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let loans = state.services.loans.find_loans_before(query.date).await?;
    Ok(Json(loans))
}

/// List the current open loans of a customer
#[utoipa::path(
    get,
    path = "/loans/customerLoans",
    tag = "loans",
    params(
        ("email" = String, Query, description = "Customer email address")
    ),
    responses(
        (status = 200, description = "Ok: successfully listed", body = Vec<LoanDto>)
    )
)]
pub async fn search_open_loans_of_customer(
    State(state): State<crate::AppState>,
    Query(query): Query<CustomerEmailQuery>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let loans = state
        .services
        .loans
        .find_open_loans_of_customer(&query.email)
        .await?;
    Ok(Json(loans))
}

/// Add a new loan to the library
#[utoipa::path(
    post,
    path = "/loans/addLoan",
    tag = "loans",
    request_body = SimpleLoanRequest,
    responses(
        (status = 201, description = "Created: the loan is successfully inserted", body = bool),
        (status = 409, description = "Conflict: an open loan already exists for the pair"),
        (status = 304, description = "Not Modified: the loan is unsuccessfully inserted")
    )
)]
pub async fn add_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<SimpleLoanRequest>,
) -> AppResult<Response> {
    match state.services.loans.create_loan(request).await {
        Ok(_) => Ok((StatusCode::CREATED, Json(true)).into_response()),
        Err(AppError::Conflict(_)) => {
            Ok((StatusCode::CONFLICT, Json(false)).into_response())
        }
        Err(other) => Err(other),
    }
}

/// Mark a loan of the library as closed
#[utoipa::path(
    post,
    path = "/loans/closeLoan",
    tag = "loans",
    request_body = SimpleLoanRequest,
    responses(
        (status = 200, description = "Ok: the loan is successfully closed", body = bool),
        (status = 204, description = "No Content: no open loan found"),
        (status = 304, description = "Not Modified: the loan is unsuccessfully closed")
    )
)]
pub async fn close_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<SimpleLoanRequest>,
) -> AppResult<Response> {
    match state.services.loans.close_loan(&request).await? {
        CloseOutcome::Closed => Ok(Json(true).into_response()),
        CloseOutcome::NoOpenLoan => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
