use chrono::NaiveDate;
use loan_desk::lending::{
    Customer, CustomerId, LendingStore, Loan, LoanId, NewCustomer, NewLoan, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    loans: BTreeMap<LoanId, Loan>,
    next_customer: i64,
    next_loan: i64,
}

/// Process-local store; ids are assigned from monotonically increasing sequences.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLendingStore {
    tables: Arc<Mutex<Tables>>,
}

impl LendingStore for InMemoryLendingStore {
    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.customers.get(&id).cloned())
    }

    fn list_loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard
            .loans
            .values()
            .filter(|loan| loan.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn insert_loan(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        if !guard.customers.contains_key(&loan.customer_id) {
            return Err(StoreError::MissingCustomer(loan.customer_id));
        }

        guard.next_loan += 1;
        let id = LoanId(guard.next_loan);
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
        guard.loans.insert(id, stored.clone());
        Ok(stored)
    }

    fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        guard.next_customer += 1;
        let id = CustomerId(guard.next_customer);
        let stored = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_salary: customer.monthly_salary,
            approved_limit: customer.approved_limit,
        };
        guard.customers.insert(id, stored.clone());
        Ok(stored)
    }

    fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.loans.get(&id).cloned())
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.customers.values().cloned().collect())
    }

    fn list_loans(&self) -> Result<Vec<Loan>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.loans.values().cloned().collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
