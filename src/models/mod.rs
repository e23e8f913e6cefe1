//! Data models for Libris

pub mod book;
pub mod category;
pub mod customer;
pub mod loan;

// Re-export commonly used types
pub use book::{Book, BookDto};
pub use category::{Category, CategoryDto};
pub use customer::{Customer, CustomerDto};
pub use loan::{Loan, LoanDto, LoanStatus};
