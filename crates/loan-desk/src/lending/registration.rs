use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Customer, NewCustomer};
use super::error::LendingError;
use super::policy::LendingPolicy;
use super::store::LendingStore;

/// Applicant details collected at sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub monthly_salary: u64,
    pub phone_number: u64,
}

/// Salary multiple rounded to the nearest rounding step, ties to even.
pub fn approved_limit_for(monthly_salary: u64, policy: &LendingPolicy) -> u64 {
    let raw = monthly_salary.saturating_mul(policy.approved_limit_salary_multiple);
    let step = policy.approved_limit_rounding;
    if step == 0 {
        return raw;
    }

    let quotient = raw / step;
    let remainder = raw % step;
    let upper = step - remainder;
    let rounded = if remainder > upper || (remainder == upper && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.saturating_mul(step)
}

pub fn register_customer<S>(
    store: &S,
    policy: &LendingPolicy,
    registration: CustomerRegistration,
) -> Result<Customer, LendingError>
where
    S: LendingStore + ?Sized,
{
    let first_name = registration.first_name.trim();
    let last_name = registration.last_name.trim();
    for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
        if value.is_empty() {
            return Err(LendingError::InvalidInput(format!(
                "{field} must not be empty"
            )));
        }
    }

    let approved_limit = approved_limit_for(registration.monthly_salary, policy);
    let customer = store.insert_customer(NewCustomer {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age: registration.age,
        phone_number: registration.phone_number,
        monthly_salary: registration.monthly_salary,
        approved_limit,
    })?;

    info!(
        customer_id = %customer.id,
        approved_limit = customer.approved_limit,
        "customer registered"
    );
    Ok(customer)
}
