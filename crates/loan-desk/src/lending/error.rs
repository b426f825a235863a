use axum::http::StatusCode;

use super::domain::{CustomerId, LoanId};
use super::store::StoreError;

/// Error raised by the lending engines and service.
#[derive(Debug, thiserror::Error)]
pub enum LendingError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),
    #[error("loan {0} not found")]
    LoanNotFound(LoanId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LendingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LendingError::CustomerNotFound(_) | LendingError::LoanNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LendingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LendingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
