use chrono::NaiveDate;

use super::domain::{CustomerId, Loan};
use super::store::{LendingStore, StoreError};

/// Caps total monthly installments at a share of monthly salary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityCheck {
    max_emi_salary_ratio: f64,
}

impl AffordabilityCheck {
    pub fn new(max_emi_salary_ratio: f64) -> Self {
        Self {
            max_emi_salary_ratio,
        }
    }

    pub fn ceiling(&self, monthly_salary: u64) -> f64 {
        self.max_emi_salary_ratio * monthly_salary as f64
    }

    /// Reaching the ceiling exactly is still affordable; only exceeding it fails.
    pub fn fits_budget(
        &self,
        current_emis: f64,
        new_installment: f64,
        monthly_salary: u64,
    ) -> bool {
        current_emis + new_installment <= self.ceiling(monthly_salary)
    }
}

impl Default for AffordabilityCheck {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Sum of installments on loans still running after `today`.
pub fn active_emis(loans: &[Loan], today: NaiveDate) -> f64 {
    loans
        .iter()
        .filter(|loan| loan.is_active_on(today))
        .map(|loan| loan.monthly_repayment)
        .sum()
}

/// Recomputes a customer's current obligations from a fresh store read.
pub fn current_obligations<S>(
    store: &S,
    customer_id: CustomerId,
    today: NaiveDate,
) -> Result<f64, StoreError>
where
    S: LendingStore + ?Sized,
{
    let loans = store.list_loans_for_customer(customer_id)?;
    Ok(active_emis(&loans, today))
}
