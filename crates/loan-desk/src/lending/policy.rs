use serde::{Deserialize, Serialize};

/// Lending dials shared by registration, eligibility, and issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    /// Share of monthly salary that all installments together may reach.
    pub max_emi_salary_ratio: f64,
    /// Minimum rate applied to scores in (30, 50].
    pub near_prime_rate_floor: f64,
    /// Minimum rate applied to scores in (10, 30].
    pub subprime_rate_floor: f64,
    pub approved_limit_salary_multiple: u64,
    pub approved_limit_rounding: u64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            max_emi_salary_ratio: 0.5,
            near_prime_rate_floor: 12.0,
            subprime_rate_floor: 16.0,
            approved_limit_salary_multiple: 36,
            approved_limit_rounding: 100_000,
        }
    }
}
