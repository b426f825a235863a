use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::affordability::{current_obligations, AffordabilityCheck};
use super::domain::{
    loan_end_date, monthly_installment, round_currency, CustomerId, LoanId, LoanRequest, NewLoan,
};
use super::error::LendingError;
use super::policy::LendingPolicy;
use super::scoring::credit_score;
use super::store::LendingStore;

/// Issuance approves only scores strictly above this, with no rate correction.
pub const ISSUANCE_MIN_SCORE: u8 = 50;

pub const REJECTION_MESSAGE: &str = "Loan not approved based on eligibility criteria.";

/// Result of a loan application. A rejection is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuanceOutcome {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub loan_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_installment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IssuanceOutcome {
    fn rejected(customer_id: CustomerId) -> Self {
        Self {
            loan_id: None,
            customer_id,
            loan_approved: false,
            monthly_installment: None,
            message: Some(REJECTION_MESSAGE.to_string()),
        }
    }
}

/// Decides and, on approval, records a new loan.
///
/// Stricter than [`check_eligibility`](super::eligibility::check_eligibility): the
/// installment always uses the requested rate and the mid tiers never pass.
pub fn create_loan<S>(
    store: &S,
    policy: &LendingPolicy,
    request: &LoanRequest,
    today: NaiveDate,
) -> Result<IssuanceOutcome, LendingError>
where
    S: LendingStore + ?Sized,
{
    request.validate(today).map_err(LendingError::InvalidInput)?;

    let customer = store
        .get_customer(request.customer_id)?
        .ok_or(LendingError::CustomerNotFound(request.customer_id))?;

    let score = credit_score(store, customer.id, today)?;
    let installment =
        monthly_installment(request.loan_amount, request.interest_rate, request.tenure);
    let current_emis = current_obligations(store, customer.id, today)?;
    let affordable = AffordabilityCheck::new(policy.max_emi_salary_ratio).fits_budget(
        current_emis,
        installment,
        customer.monthly_salary,
    );

    let approved = score.value > ISSUANCE_MIN_SCORE && affordable;
    debug!(
        customer_id = %customer.id,
        score = score.value,
        current_emis,
        installment,
        affordable,
        approved,
        "issuance evaluated"
    );
    if !approved {
        return Ok(IssuanceOutcome::rejected(customer.id));
    }

    let end_date = loan_end_date(today, request.tenure).ok_or_else(|| {
        LendingError::InvalidInput(format!(
            "tenure of {} months runs past the supported calendar",
            request.tenure
        ))
    })?;

    let loan = store.insert_loan(NewLoan {
        customer_id: customer.id,
        loan_amount: request.loan_amount,
        tenure: request.tenure,
        interest_rate: request.interest_rate,
        monthly_repayment: round_currency(installment),
        emis_paid_on_time: 0,
        start_date: today,
        end_date,
    })?;

    info!(
        loan_id = %loan.id,
        customer_id = %customer.id,
        monthly_repayment = loan.monthly_repayment,
        "loan issued"
    );

    Ok(IssuanceOutcome {
        loan_id: Some(loan.id),
        customer_id: customer.id,
        loan_approved: true,
        monthly_installment: Some(loan.monthly_repayment),
        message: None,
    })
}
