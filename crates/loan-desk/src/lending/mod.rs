//! Customer registration, credit scoring, and the two loan decision paths.
//!
//! `check_eligibility` is advisory and prices mid-tier scores at a corrected rate;
//! `create_loan` is stricter, prices at the requested rate, and writes the loan on approval.
//! Every engine takes the store handle explicitly so the logic runs against any
//! [`LendingStore`].

pub mod affordability;
pub mod domain;
pub mod eligibility;
mod error;
pub mod issuance;
mod locks;
mod policy;
pub mod registration;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use affordability::{active_emis, current_obligations, AffordabilityCheck};
pub use domain::{
    loan_end_date, monthly_installment, Customer, CustomerId, CustomerSummary, Loan,
    LoanDetailView, LoanId, LoanRequest, NewCustomer, NewLoan,
};
pub use eligibility::{check_eligibility, EligibilityDecision, RateTier};
pub use error::LendingError;
pub use issuance::{create_loan, IssuanceOutcome, REJECTION_MESSAGE};
pub use policy::LendingPolicy;
pub use registration::{approved_limit_for, register_customer, CustomerRegistration};
pub use router::lending_router;
pub use scoring::{credit_score, score_history, CreditScore};
pub use service::LoanDeskService;
pub use store::{LendingStore, StoreError};
