use super::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};

/// Storage abstraction for customers and their loans.
///
/// Engines only ever read snapshots and append loans; they never update existing rows.
pub trait LendingStore: Send + Sync {
    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;
    fn list_loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, StoreError>;
    /// Fails with [`StoreError::MissingCustomer`] when the owner does not exist.
    fn insert_loan(&self, loan: NewLoan) -> Result<Loan, StoreError>;
    fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError>;
    fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, StoreError>;
    fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;
    fn list_loans(&self) -> Result<Vec<Loan>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("loan references unknown customer {0}")]
    MissingCustomer(CustomerId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
