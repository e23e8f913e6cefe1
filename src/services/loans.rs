//! Loan management service

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanDto, SimpleLoanRequest},
    repository::Repository,
};

/// Outcome of a close attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The OPEN loan was flipped to CLOSE
    Closed,
    /// No OPEN loan exists for the pair
    NoOpenLoan,
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a loan for a (book, customer) pair. Rejects with a conflict
    /// when an OPEN loan already exists for that pair. Pre-check and insert
    /// share one transaction; the stamped creation time completes the row.
    pub async fn create_loan(&self, request: SimpleLoanRequest) -> AppResult<Loan> {
        let mut tx = self.repository.pool.begin().await?;

        if self
            .repository
            .loans
            .find_open_by_pair(&mut tx, request.book_id, request.customer_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "An open loan already exists for book {} and customer {}",
                request.book_id, request.customer_id
            )));
        }

        let created = self
            .repository
            .loans
            .create(&mut tx, &request, Utc::now())
            .await?;

        tx.commit().await?;

        created.ok_or_else(|| AppError::NotModified("Loan was not persisted".to_string()))
    }

    /// Close the OPEN loan for a (book, customer) pair. Lookup and update
    /// share one transaction.
    pub async fn close_loan(&self, request: &SimpleLoanRequest) -> AppResult<CloseOutcome> {
        let mut tx = self.repository.pool.begin().await?;

        let Some(loan) = self
            .repository
            .loans
            .find_open_by_pair(&mut tx, request.book_id, request.customer_id)
            .await?
        else {
            return Ok(CloseOutcome::NoOpenLoan);
        };

        let touched = self.repository.loans.close(&mut tx, loan.id).await?;

        tx.commit().await?;

        if touched == 0 {
            return Err(AppError::NotModified("Loan was not closed".to_string()));
        }

        Ok(CloseOutcome::Closed)
    }

    /// All loans ending strictly before the given date, as sorted DTOs
    pub async fn find_loans_before(&self, max_end_date: NaiveDate) -> AppResult<Vec<LoanDto>> {
        let rows = self
            .repository
            .loans
            .find_by_end_date_before(max_end_date)
            .await?;

        let mut loans: Vec<LoanDto> = rows.into_iter().map(LoanDto::from_row).collect();
        loans.sort();
        Ok(loans)
    }

    /// All OPEN loans of the customer with the given email, as sorted DTOs
    pub async fn find_open_loans_of_customer(&self, email: &str) -> AppResult<Vec<LoanDto>> {
        let rows = self
            .repository
            .loans
            .find_open_by_customer_email(email)
            .await?;

        let mut loans: Vec<LoanDto> = rows.into_iter().map(LoanDto::from_row).collect();
        loans.sort();
        Ok(loans)
    }
}
