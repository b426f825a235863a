use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days counted per tenure month when computing a loan's end date.
pub const DAYS_PER_TENURE_MONTH: i64 = 30;

/// Store-generated customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-generated loan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(pub i64);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered borrower. Salary and limit are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: u64,
    pub monthly_salary: u64,
    pub approved_limit: u64,
}

/// Customer fields prior to the store assigning an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: u64,
    pub monthly_salary: u64,
    pub approved_limit: u64,
}

/// A loan owned by exactly one customer, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub tenure: i32,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Loan {
    /// Active loans still count toward current debt and obligations.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.end_date > today
    }
}

/// Loan fields prior to the store assigning an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub tenure: i32,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// End of a loan's lifetime, `None` if the date would overflow.
pub fn loan_end_date(start_date: NaiveDate, tenure_months: i32) -> Option<NaiveDate> {
    let days = i64::from(tenure_months).checked_mul(DAYS_PER_TENURE_MONTH)?;
    start_date.checked_add_signed(Duration::try_days(days)?)
}

/// Requested terms shared by the eligibility check and loan issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure: i32,
}

impl LoanRequest {
    /// Rejects terms that would make the installment formula meaningless, or a loan
    /// starting on `start_date` that would end past the supported calendar.
    pub fn validate(&self, start_date: NaiveDate) -> Result<(), String> {
        if self.tenure <= 0 {
            return Err(format!("tenure must be positive, got {}", self.tenure));
        }
        if loan_end_date(start_date, self.tenure).is_none() {
            return Err(format!(
                "tenure of {} months runs past the supported calendar",
                self.tenure
            ));
        }
        if !self.loan_amount.is_finite() || self.loan_amount < 0.0 {
            return Err(format!(
                "loan_amount must be a non-negative number, got {}",
                self.loan_amount
            ));
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(format!(
                "interest_rate must be a non-negative number, got {}",
                self.interest_rate
            ));
        }
        Ok(())
    }
}

/// Flat-interest installment: principal plus one period of interest spread over the tenure.
pub fn monthly_installment(loan_amount: f64, interest_rate: f64, tenure_months: i32) -> f64 {
    (loan_amount * (1.0 + interest_rate / 100.0)) / f64::from(tenure_months)
}

/// Rounds a currency amount to two decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Customer details nested inside loan views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: u64,
    pub age: u32,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone_number: customer.phone_number,
            age: customer.age,
        }
    }
}

/// Loan joined with its owner's summary for read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailView {
    pub id: LoanId,
    pub customer: CustomerSummary,
    pub loan_amount: f64,
    pub tenure: i32,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanDetailView {
    pub fn new(loan: Loan, customer: CustomerSummary) -> Self {
        Self {
            id: loan.id,
            customer,
            loan_amount: loan.loan_amount,
            tenure: loan.tenure,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_repayment,
            emis_paid_on_time: loan.emis_paid_on_time,
            start_date: loan.start_date,
            end_date: loan.end_date,
        }
    }
}
