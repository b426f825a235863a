use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::domain::{
    Customer, CustomerId, CustomerSummary, LoanDetailView, LoanId, LoanRequest,
};
use super::eligibility::{check_eligibility, EligibilityDecision};
use super::error::LendingError;
use super::issuance::{create_loan, IssuanceOutcome};
use super::locks::CustomerLocks;
use super::policy::LendingPolicy;
use super::registration::{register_customer, CustomerRegistration};
use super::scoring::{credit_score, CreditScore};
use super::store::LendingStore;

/// Service composing the store handle, lending policy, and per-customer issuance locks.
pub struct LoanDeskService<S> {
    store: Arc<S>,
    policy: LendingPolicy,
    locks: CustomerLocks,
}

impl<S> LoanDeskService<S>
where
    S: LendingStore + 'static,
{
    pub fn new(store: Arc<S>, policy: LendingPolicy) -> Self {
        Self {
            store,
            policy,
            locks: CustomerLocks::default(),
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn register(&self, registration: CustomerRegistration) -> Result<Customer, LendingError> {
        register_customer(self.store.as_ref(), &self.policy, registration).inspect_err(log_store)
    }

    pub fn credit_score(
        &self,
        customer_id: CustomerId,
        today: NaiveDate,
    ) -> Result<CreditScore, LendingError> {
        credit_score(self.store.as_ref(), customer_id, today)
            .map_err(LendingError::from)
            .inspect_err(log_store)
    }

    pub fn check_eligibility(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<EligibilityDecision, LendingError> {
        check_eligibility(self.store.as_ref(), &self.policy, request, today).inspect_err(log_store)
    }

    /// Issues a loan while holding the customer's slot, so concurrent applications for the
    /// same customer see each other's installments in the affordability check.
    ///
    /// Malformed requests and unknown customers are rejected before a slot is taken. The
    /// slot is a blocking mutex held only across store calls; async callers park a worker
    /// thread for that span.
    pub fn create_loan(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<IssuanceOutcome, LendingError> {
        request
            .validate(today)
            .map_err(LendingError::InvalidInput)?;
        if self
            .store
            .get_customer(request.customer_id)
            .inspect_err(|err| warn!(error = %err, "lending store failure"))?
            .is_none()
        {
            return Err(LendingError::CustomerNotFound(request.customer_id));
        }

        let lease = self.locks.lease(request.customer_id);
        let _held = lease.hold();
        create_loan(self.store.as_ref(), &self.policy, request, today).inspect_err(log_store)
    }

    #[cfg(test)]
    pub(crate) fn tracked_issuance_slots(&self) -> usize {
        self.locks.tracked()
    }

    pub fn view_loan(&self, loan_id: LoanId) -> Result<LoanDetailView, LendingError> {
        let loan = self
            .store
            .get_loan(loan_id)?
            .ok_or(LendingError::LoanNotFound(loan_id))?;
        let customer = self
            .store
            .get_customer(loan.customer_id)?
            .ok_or(LendingError::CustomerNotFound(loan.customer_id))?;
        Ok(LoanDetailView::new(loan, CustomerSummary::from(&customer)))
    }

    /// Loans owned by a customer; an unknown customer simply owns none.
    pub fn customer_loans(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LoanDetailView>, LendingError> {
        let Some(customer) = self.store.get_customer(customer_id)? else {
            return Ok(Vec::new());
        };
        let summary = CustomerSummary::from(&customer);
        let loans = self.store.list_loans_for_customer(customer_id)?;
        Ok(loans
            .into_iter()
            .map(|loan| LoanDetailView::new(loan, summary.clone()))
            .collect())
    }

    pub fn customers(&self) -> Result<Vec<CustomerSummary>, LendingError> {
        let customers = self.store.list_customers()?;
        Ok(customers.iter().map(CustomerSummary::from).collect())
    }

    pub fn loans(&self) -> Result<Vec<LoanDetailView>, LendingError> {
        let owners: HashMap<CustomerId, CustomerSummary> = self
            .store
            .list_customers()?
            .iter()
            .map(|customer| (customer.id, CustomerSummary::from(customer)))
            .collect();

        self.store
            .list_loans()?
            .into_iter()
            .map(|loan| {
                let owner = owners
                    .get(&loan.customer_id)
                    .cloned()
                    .ok_or(LendingError::CustomerNotFound(loan.customer_id))?;
                Ok(LoanDetailView::new(loan, owner))
            })
            .collect()
    }
}

fn log_store(err: &LendingError) {
    if let LendingError::Store(source) = err {
        warn!(error = %source, "lending store failure");
    }
}
