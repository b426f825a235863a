use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{CustomerId, LoanId, LoanRequest};
use super::error::LendingError;
use super::registration::CustomerRegistration;
use super::service::LoanDeskService;
use super::store::LendingStore;

/// Router builder exposing registration, decision, and read endpoints.
pub fn lending_router<S>(service: Arc<LoanDeskService<S>>) -> Router
where
    S: LendingStore + 'static,
{
    Router::new()
        .route("/api/register", post(register_handler::<S>))
        .route("/api/check-eligibility", post(eligibility_handler::<S>))
        .route("/api/create-loan", post(create_loan_handler::<S>))
        .route("/api/view-loan/:loan_id", get(view_loan_handler::<S>))
        .route(
            "/api/view-loans/:customer_id",
            get(customer_loans_handler::<S>),
        )
        .route("/api/customers", get(customers_handler::<S>))
        .route("/api/loans", get(loans_handler::<S>))
        .with_state(service)
}

fn failure(error: LendingError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

/// Undecodable bodies are invalid input, reported in the same JSON shape as engine errors.
fn malformed(rejection: JsonRejection) -> Response {
    failure(LendingError::InvalidInput(rejection.body_text()))
}

pub(crate) async fn register_handler<S>(
    State(service): State<Arc<LoanDeskService<S>>>,
    body: Result<axum::Json<CustomerRegistration>, JsonRejection>,
) -> Response
where
    S: LendingStore + 'static,
{
    let registration = match body {
        Ok(axum::Json(registration)) => registration,
        Err(rejection) => return malformed(rejection),
    };
    match service.register(registration) {
        Ok(customer) => (StatusCode::CREATED, axum::Json(customer)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn eligibility_handler<S>(
    State(service): State<Arc<LoanDeskService<S>>>,
    body: Result<axum::Json<LoanRequest>, JsonRejection>,
) -> Response
where
    S: LendingStore + 'static,
{
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return malformed(rejection),
    };
    let today = Local::now().date_naive();
    match service.check_eligibility(&request, today) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn create_loan_handler<S>(
    State(service): State<Arc<LoanDeskService<S>>>,
    body: Result<axum::Json<LoanRequest>, JsonRejection>,
) -> Response
where
    S: LendingStore + 'static,
{
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return malformed(rejection),
    };
    let today = Local::now().date_naive();
    match service.create_loan(&request, today) {
        Ok(outcome) => {
            let status = if outcome.loan_approved {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, axum::Json(outcome)).into_response()
        }
        Err(error) => failure(error),
    }
}

pub(crate) async fn view_loan_handler<S>(
    State(service): State<Arc<LoanDeskService<S>>>,
    Path(loan_id): Path<i64>,
) -> Response
where
    S: LendingStore + 'static,
{
    match service.view_loan(LoanId(loan_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn customer_loans_handler<S>(
    State(service): State<Arc<LoanDeskService<S>>>,
    Path(customer_id): Path<i64>,
) -> Response
where
    S: LendingStore + 'static,
{
    match service.customer_loans(CustomerId(customer_id)) {
        Ok(loans) => (StatusCode::OK, axum::Json(loans)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn customers_handler<S>(State(service): State<Arc<LoanDeskService<S>>>) -> Response
where
    S: LendingStore + 'static,
{
    match service.customers() {
        Ok(customers) => (StatusCode::OK, axum::Json(customers)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn loans_handler<S>(State(service): State<Arc<LoanDeskService<S>>>) -> Response
where
    S: LendingStore + 'static,
{
    match service.loans() {
        Ok(loans) => (StatusCode::OK, axum::Json(loans)).into_response(),
        Err(error) => failure(error),
    }
}
