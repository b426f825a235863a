use crate::infra::InMemoryLendingStore;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use loan_desk::error::AppError;
use loan_desk::lending::{
    CustomerId, CustomerRegistration, EligibilityDecision, IssuanceOutcome, LendingError,
    LendingPolicy, LendingStore, LoanDeskService, LoanRequest, NewLoan, StoreError,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for every decision (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Requested principal for each sample application.
    #[arg(long, default_value_t = 120_000.0)]
    pub(crate) loan_amount: f64,
    /// Requested annual interest rate in percent.
    #[arg(long, default_value_t = 8.0)]
    pub(crate) interest_rate: f64,
    /// Requested tenure in months.
    #[arg(long, default_value_t = 12)]
    pub(crate) tenure: i32,
}

struct Persona {
    label: &'static str,
    registration: CustomerRegistration,
    closed_loans: usize,
    on_time_per_loan: u32,
    active_debt: Option<(f64, f64)>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let store = Arc::new(InMemoryLendingStore::default());
    let service = LoanDeskService::new(store.clone(), LendingPolicy::default());

    println!("Loan desk demo");
    println!(
        "Request: {:.2} at {:.2}% over {} months (evaluated {})",
        args.loan_amount, args.interest_rate, args.tenure, today
    );

    for persona in personas() {
        let customer = service.register(persona.registration.clone())?;
        seed_history(store.as_ref(), customer.id, &persona, today).map_err(LendingError::from)?;

        let score = service.credit_score(customer.id, today)?;
        let request = LoanRequest {
            customer_id: customer.id,
            loan_amount: args.loan_amount,
            interest_rate: args.interest_rate,
            tenure: args.tenure,
        };
        let eligibility = service.check_eligibility(&request, today)?;
        let issuance = service.create_loan(&request, today)?;

        println!(
            "\n{} (customer {}, salary {}, limit {})",
            persona.label, customer.id, customer.monthly_salary, customer.approved_limit
        );
        println!(
            "- credit score {} ({} loans, {} EMIs on time, current debt {:.2}{})",
            score.value,
            score.loan_count,
            score.on_time_emis,
            score.current_debt,
            if score.over_limit { ", over limit" } else { "" }
        );
        render_eligibility(&eligibility);
        render_issuance(&issuance);
    }

    let total = service.loans()?.len();
    println!("\nLoans on file after demo: {total}");
    Ok(())
}

fn personas() -> Vec<Persona> {
    let registration = |first: &str, last: &str, age: u32, salary: u64| CustomerRegistration {
        first_name: first.to_string(),
        last_name: last.to_string(),
        age,
        monthly_salary: salary,
        phone_number: 9_800_000_000 + u64::from(age),
    };

    vec![
        Persona {
            label: "Seasoned borrower",
            registration: registration("Anil", "Kapoor", 45, 80_000),
            closed_loans: 6,
            on_time_per_loan: 10,
            active_debt: None,
        },
        Persona {
            label: "First-time applicant",
            registration: registration("Divya", "Menon", 27, 50_000),
            closed_loans: 0,
            on_time_per_loan: 0,
            active_debt: None,
        },
        Persona {
            label: "Over-extended borrower",
            registration: registration("Rohit", "Verma", 39, 30_000),
            closed_loans: 5,
            on_time_per_loan: 2,
            active_debt: Some((1_500_000.0, 9_000.0)),
        },
    ]
}

fn seed_history<S: LendingStore>(
    store: &S,
    customer_id: CustomerId,
    persona: &Persona,
    today: NaiveDate,
) -> Result<(), StoreError> {
    let closed_end = today - Duration::days(45);
    for _ in 0..persona.closed_loans {
        store.insert_loan(NewLoan {
            customer_id,
            loan_amount: 60_000.0,
            tenure: 12,
            interest_rate: 11.0,
            monthly_repayment: 5_550.0,
            emis_paid_on_time: persona.on_time_per_loan,
            start_date: closed_end - Duration::days(360),
            end_date: closed_end,
        })?;
    }

    if let Some((loan_amount, monthly_repayment)) = persona.active_debt {
        store.insert_loan(NewLoan {
            customer_id,
            loan_amount,
            tenure: 24,
            interest_rate: 14.0,
            monthly_repayment,
            emis_paid_on_time: 3,
            start_date: today - Duration::days(90),
            end_date: today + Duration::days(630),
        })?;
    }
    Ok(())
}

fn render_eligibility(decision: &EligibilityDecision) {
    match (
        decision.corrected_interest_rate,
        decision.monthly_installment,
    ) {
        (Some(rate), Some(installment)) if decision.approval => println!(
            "- eligibility: approved at {:.2}% (requested {:.2}%), installment {:.2}",
            rate, decision.interest_rate, installment
        ),
        _ => println!("- eligibility: not approved"),
    }
}

fn render_issuance(outcome: &IssuanceOutcome) {
    match (outcome.loan_id, outcome.monthly_installment) {
        (Some(loan_id), Some(installment)) => {
            println!("- issuance: loan {loan_id} booked, installment {installment:.2}")
        }
        _ => println!(
            "- issuance: declined ({})",
            outcome.message.as_deref().unwrap_or("no reason given")
        ),
    }
}
