//! Business logic services

pub mod books;
pub mod customers;
pub mod email;
pub mod loans;

use crate::{config::EmailConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub customers: customers::CustomersService,
    pub loans: loans::LoansService,
    pub email: email::EmailService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, email_config: EmailConfig) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            email: email::EmailService::new(email_config),
            repository,
        }
    }
}
