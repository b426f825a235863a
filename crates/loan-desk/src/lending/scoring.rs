use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{CustomerId, Loan};
use super::store::{LendingStore, StoreError};

const BASE_SCORE: u8 = 50;
const MAX_SCORE: u8 = 100;
const SEASONED_BORROWER_LOANS: usize = 5;
const SEASONED_BORROWER_BONUS: u8 = 10;
const PUNCTUAL_PAYER_EMIS: u64 = 50;
const PUNCTUAL_PAYER_BONUS: u8 = 15;

/// Credit score in `[0, 100]` together with the history figures that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditScore {
    pub value: u8,
    pub on_time_emis: u64,
    pub loan_count: usize,
    pub current_debt: f64,
    pub over_limit: bool,
}

impl CreditScore {
    /// Score reported for customers the store does not know.
    pub fn unknown_customer() -> Self {
        Self {
            value: 0,
            on_time_emis: 0,
            loan_count: 0,
            current_debt: 0.0,
            over_limit: false,
        }
    }
}

/// Scores one customer's loan history against their approved limit.
///
/// Exceeding the limit resets the running score to zero, but the seasoning and punctuality
/// bonuses are still added afterwards, so an over-limit borrower can finish above zero.
pub fn score_history(loans: &[Loan], approved_limit: u64, today: NaiveDate) -> CreditScore {
    let on_time_emis: u64 = loans
        .iter()
        .map(|loan| u64::from(loan.emis_paid_on_time))
        .sum();
    let loan_count = loans.len();
    let current_debt: f64 = loans
        .iter()
        .filter(|loan| loan.is_active_on(today))
        .map(|loan| loan.loan_amount)
        .sum();

    let mut score = BASE_SCORE;
    let over_limit = current_debt > approved_limit as f64;
    if over_limit {
        score = 0;
    }
    if loan_count > SEASONED_BORROWER_LOANS {
        score += SEASONED_BORROWER_BONUS;
    }
    if on_time_emis > PUNCTUAL_PAYER_EMIS {
        score += PUNCTUAL_PAYER_BONUS;
    }

    CreditScore {
        value: score.min(MAX_SCORE),
        on_time_emis,
        loan_count,
        current_debt,
        over_limit,
    }
}

/// Scores a customer straight from the store. Unknown customers score zero.
pub fn credit_score<S>(
    store: &S,
    customer_id: CustomerId,
    today: NaiveDate,
) -> Result<CreditScore, StoreError>
where
    S: LendingStore + ?Sized,
{
    let Some(customer) = store.get_customer(customer_id)? else {
        return Ok(CreditScore::unknown_customer());
    };

    let loans = store.list_loans_for_customer(customer_id)?;
    Ok(score_history(&loans, customer.approved_limit, today))
}
