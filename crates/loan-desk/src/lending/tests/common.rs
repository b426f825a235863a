use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::lending::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};
use crate::lending::store::{LendingStore, StoreError};
use crate::lending::{lending_router, LendingPolicy, LoanDeskService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn policy() -> LendingPolicy {
    LendingPolicy::default()
}

#[derive(Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    loans: BTreeMap<LoanId, Loan>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub(super) fn customer(&self, monthly_salary: u64, approved_limit: u64) -> CustomerId {
        self.insert_customer(NewCustomer {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            age: 34,
            phone_number: 9_876_543_210,
            monthly_salary,
            approved_limit,
        })
        .expect("customer inserted")
        .id
    }

    pub(super) fn loan(
        &self,
        customer_id: CustomerId,
        loan_amount: f64,
        monthly_repayment: f64,
        emis_paid_on_time: u32,
        end_date: NaiveDate,
    ) -> LoanId {
        self.insert_loan(NewLoan {
            customer_id,
            loan_amount,
            tenure: 12,
            interest_rate: 10.0,
            monthly_repayment,
            emis_paid_on_time,
            start_date: end_date - Duration::days(360),
            end_date,
        })
        .expect("loan inserted")
        .id
    }

    /// Closed loans count toward history but not toward debt or obligations.
    pub(super) fn closed_loans(&self, customer_id: CustomerId, count: usize, on_time_each: u32) {
        let ended = today() - Duration::days(30);
        for _ in 0..count {
            self.loan(customer_id, 50_000.0, 4_500.0, on_time_each, ended);
        }
    }

    pub(super) fn loan_count(&self) -> usize {
        self.tables.lock().expect("store mutex poisoned").loans.len()
    }
}

impl LendingStore for MemoryStore {
    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.customers.get(&id).cloned())
    }

    fn list_loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .loans
            .values()
            .filter(|loan| loan.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn insert_loan(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if !tables.customers.contains_key(&loan.customer_id) {
            return Err(StoreError::MissingCustomer(loan.customer_id));
        }
        let id = LoanId(tables.loans.len() as i64 + 1);
        let stored = Loan {
            id,
            customer_id: loan.customer_id,
            loan_amount: loan.loan_amount,
            tenure: loan.tenure,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_repayment,
            emis_paid_on_time: loan.emis_paid_on_time,
            start_date: loan.start_date,
            end_date: loan.end_date,
        };
        tables.loans.insert(id, stored.clone());
        Ok(stored)
    }

    fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let id = CustomerId(tables.customers.len() as i64 + 1);
        let stored = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_salary: customer.monthly_salary,
            approved_limit: customer.approved_limit,
        };
        tables.customers.insert(id, stored.clone());
        Ok(stored)
    }

    fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.loans.get(&id).cloned())
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.customers.values().cloned().collect())
    }

    fn list_loans(&self) -> Result<Vec<Loan>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.loans.values().cloned().collect())
    }
}

/// Reads succeed from the wrapped store but every write is refused.
pub(super) struct ReadOnlyStore {
    pub(super) inner: MemoryStore,
}

impl LendingStore for ReadOnlyStore {
    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        self.inner.get_customer(id)
    }

    fn list_loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, StoreError> {
        self.inner.list_loans_for_customer(customer_id)
    }

    fn insert_loan(&self, _loan: NewLoan) -> Result<Loan, StoreError> {
        Err(StoreError::Unavailable("read only replica".to_string()))
    }

    fn insert_customer(&self, _customer: NewCustomer) -> Result<Customer, StoreError> {
        Err(StoreError::Unavailable("read only replica".to_string()))
    }

    fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, StoreError> {
        self.inner.get_loan(id)
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.inner.list_customers()
    }

    fn list_loans(&self) -> Result<Vec<Loan>, StoreError> {
        self.inner.list_loans()
    }
}

pub(super) struct UnavailableStore;

impl LendingStore for UnavailableStore {
    fn get_customer(&self, _id: CustomerId) -> Result<Option<Customer>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_loans_for_customer(&self, _customer_id: CustomerId) -> Result<Vec<Loan>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert_loan(&self, _loan: NewLoan) -> Result<Loan, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert_customer(&self, _customer: NewCustomer) -> Result<Customer, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get_loan(&self, _id: LoanId) -> Result<Option<Loan>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_loans(&self) -> Result<Vec<Loan>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (LoanDeskService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = LoanDeskService::new(store.clone(), policy());
    (service, store)
}

pub(super) fn router_with_store(store: Arc<MemoryStore>) -> axum::Router {
    lending_router(Arc::new(LoanDeskService::new(store, policy())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
