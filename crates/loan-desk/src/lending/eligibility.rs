use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::affordability::{current_obligations, AffordabilityCheck};
use super::domain::{monthly_installment, round_currency, CustomerId, LoanRequest};
use super::error::LendingError;
use super::policy::LendingPolicy;
use super::scoring::credit_score;
use super::store::LendingStore;

/// Pricing band selected by credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    /// Above 50: requested rate stands.
    Prime,
    /// Above 30 up to 50.
    NearPrime,
    /// Above 10 up to 30.
    Subprime,
    /// 10 or below.
    Declined,
}

impl RateTier {
    pub fn for_score(score: u8) -> Self {
        match score {
            51.. => RateTier::Prime,
            31..=50 => RateTier::NearPrime,
            11..=30 => RateTier::Subprime,
            _ => RateTier::Declined,
        }
    }

    /// Rate the tier lends at, or `None` when the tier declines outright.
    pub fn corrected_rate(self, requested_rate: f64, policy: &LendingPolicy) -> Option<f64> {
        match self {
            RateTier::Prime => Some(requested_rate),
            RateTier::NearPrime => Some(requested_rate.max(policy.near_prime_rate_floor)),
            RateTier::Subprime => Some(requested_rate.max(policy.subprime_rate_floor)),
            RateTier::Declined => None,
        }
    }
}

/// Advisory answer to an eligibility check. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub customer_id: CustomerId,
    pub approval: bool,
    pub interest_rate: f64,
    pub corrected_interest_rate: Option<f64>,
    pub tenure: i32,
    pub monthly_installment: Option<f64>,
}

/// Dry-run decision using tiered rate correction.
///
/// The installment is priced at the corrected rate, and the affordability check runs
/// against that installment. Rate and installment are hidden unless approved.
pub fn check_eligibility<S>(
    store: &S,
    policy: &LendingPolicy,
    request: &LoanRequest,
    today: NaiveDate,
) -> Result<EligibilityDecision, LendingError>
where
    S: LendingStore + ?Sized,
{
    request.validate(today).map_err(LendingError::InvalidInput)?;

    let customer = store
        .get_customer(request.customer_id)?
        .ok_or(LendingError::CustomerNotFound(request.customer_id))?;

    let score = credit_score(store, customer.id, today)?;
    let tier = RateTier::for_score(score.value);
    let tier_rate = tier.corrected_rate(request.interest_rate, policy);
    let pricing_rate = tier_rate.unwrap_or(request.interest_rate);

    let installment = monthly_installment(request.loan_amount, pricing_rate, request.tenure);
    let current_emis = current_obligations(store, customer.id, today)?;
    let affordable = AffordabilityCheck::new(policy.max_emi_salary_ratio).fits_budget(
        current_emis,
        installment,
        customer.monthly_salary,
    );

    let approval = tier_rate.is_some() && affordable;
    debug!(
        customer_id = %customer.id,
        score = score.value,
        ?tier,
        current_emis,
        installment,
        affordable,
        approval,
        "eligibility evaluated"
    );

    Ok(EligibilityDecision {
        customer_id: customer.id,
        approval,
        interest_rate: request.interest_rate,
        corrected_interest_rate: if approval { Some(pricing_rate) } else { None },
        tenure: request.tenure,
        monthly_installment: if approval {
            Some(round_currency(installment))
        } else {
            None
        },
    })
}
