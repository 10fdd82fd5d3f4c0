//! Boundary validation for user input.
//!
//! The reducer accepts any action. Uniqueness, required fields, and numeric
//! parsing are checked here before an action is built and dispatched.

pub mod account_service;
pub mod budget_service;
pub mod category_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use transaction_service::{TransactionInput, TransactionService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServiceError::Invalid(format!("{} is required", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn same_key(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
