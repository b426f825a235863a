use super::common::*;
use chrono::Duration;

use crate::lending::affordability::AffordabilityCheck;
use crate::lending::domain::{monthly_installment, CustomerId, LoanRequest};
use crate::lending::eligibility::{check_eligibility, RateTier};
use crate::lending::LendingError;

fn request(customer_id: CustomerId) -> LoanRequest {
    LoanRequest {
        customer_id,
        loan_amount: 120_000.0,
        interest_rate: 8.0,
        tenure: 12,
    }
}

#[test]
fn tiers_cover_every_score_with_exclusive_upper_bounds() {
    assert_eq!(RateTier::for_score(100), RateTier::Prime);
    assert_eq!(RateTier::for_score(51), RateTier::Prime);
    assert_eq!(RateTier::for_score(50), RateTier::NearPrime);
    assert_eq!(RateTier::for_score(31), RateTier::NearPrime);
    assert_eq!(RateTier::for_score(30), RateTier::Subprime);
    assert_eq!(RateTier::for_score(11), RateTier::Subprime);
    assert_eq!(RateTier::for_score(10), RateTier::Declined);
    assert_eq!(RateTier::for_score(0), RateTier::Declined);
}

#[test]
fn tiers_raise_rates_to_their_floor_only() {
    let policy = policy();

    assert_eq!(RateTier::Prime.corrected_rate(8.0, &policy), Some(8.0));
    assert_eq!(RateTier::NearPrime.corrected_rate(8.0, &policy), Some(12.0));
    assert_eq!(RateTier::NearPrime.corrected_rate(14.5, &policy), Some(14.5));
    assert_eq!(RateTier::Subprime.corrected_rate(8.0, &policy), Some(16.0));
    assert_eq!(RateTier::Subprime.corrected_rate(18.0, &policy), Some(18.0));
    assert_eq!(RateTier::Declined.corrected_rate(8.0, &policy), None);
}

#[test]
fn score_forty_prices_at_twelve_percent() {
    let rate = RateTier::for_score(40)
        .corrected_rate(8.0, &policy())
        .expect("near prime approves");

    assert_eq!(rate, 12.0);
    assert!((monthly_installment(120_000.0, rate, 12) - 11_200.0).abs() < 1e-6);
}

#[test]
fn affordability_allows_reaching_the_ceiling_exactly() {
    let check = AffordabilityCheck::default();

    assert!(check.fits_budget(4_000.0, 6_000.0, 20_000));
    assert!(!check.fits_budget(4_000.0, 6_000.01, 20_000));
}

#[test]
fn prime_customer_keeps_requested_rate() {
    let store = MemoryStore::default();
    let customer = store.customer(50_000, 1_800_000);
    store.closed_loans(customer, 6, 3);

    let decision =
        check_eligibility(&store, &policy(), &request(customer), today()).expect("decision");

    assert!(decision.approval);
    assert_eq!(decision.interest_rate, 8.0);
    assert_eq!(decision.corrected_interest_rate, Some(8.0));
    assert_eq!(decision.monthly_installment, Some(10_800.0));
    assert_eq!(decision.tenure, 12);
}

#[test]
fn score_of_fifty_lands_in_near_prime_tier() {
    let store = MemoryStore::default();
    let customer = store.customer(50_000, 1_800_000);

    let decision =
        check_eligibility(&store, &policy(), &request(customer), today()).expect("decision");

    assert!(decision.approval);
    assert_eq!(decision.corrected_interest_rate, Some(12.0));
    assert_eq!(decision.monthly_installment, Some(11_200.0));
}

#[test]
fn over_limit_customer_with_bonuses_gets_subprime_pricing() {
    let store = MemoryStore::default();
    let customer = store.customer(1_000_000, 100_000);
    store.closed_loans(customer, 5, 12);
    store.loan(customer, 150_000.0, 1_000.0, 0, today() + Duration::days(120));

    let decision =
        check_eligibility(&store, &policy(), &request(customer), today()).expect("decision");

    assert!(decision.approval);
    assert_eq!(decision.corrected_interest_rate, Some(16.0));
    assert_eq!(decision.monthly_installment, Some(11_600.0));
}

#[test]
fn low_score_is_declined_and_terms_are_masked() {
    let store = MemoryStore::default();
    let customer = store.customer(1_000_000, 100_000);
    store.closed_loans(customer, 5, 1);
    store.loan(customer, 150_000.0, 1_000.0, 0, today() + Duration::days(120));

    let decision =
        check_eligibility(&store, &policy(), &request(customer), today()).expect("decision");

    assert!(!decision.approval, "score of 10 must not approve");
    assert_eq!(decision.interest_rate, 8.0);
    assert_eq!(decision.corrected_interest_rate, None);
    assert_eq!(decision.monthly_installment, None);
}

#[test]
fn existing_obligations_can_flip_an_approved_tier() {
    let store = MemoryStore::default();
    let customer = store.customer(50_000, 1_800_000);
    store.loan(customer, 200_000.0, 20_000.0, 0, today() + Duration::days(300));

    let decision =
        check_eligibility(&store, &policy(), &request(customer), today()).expect("decision");

    assert!(!decision.approval, "20000 + 11200 exceeds 25000");
    assert_eq!(decision.corrected_interest_rate, None);
    assert_eq!(decision.monthly_installment, None);
}

#[test]
fn zero_tenure_is_rejected_before_dividing() {
    let store = MemoryStore::default();
    let customer = store.customer(50_000, 1_800_000);
    let mut request = request(customer);
    request.tenure = 0;

    match check_eligibility(&store, &policy(), &request, today()) {
        Err(LendingError::InvalidInput(message)) => assert!(message.contains("tenure")),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn tenure_past_the_calendar_is_rejected() {
    let store = MemoryStore::default();
    let customer = store.customer(50_000, 1_800_000);
    let mut request = request(customer);
    request.tenure = i32::MAX;

    match check_eligibility(&store, &policy(), &request, today()) {
        Err(LendingError::InvalidInput(message)) => assert!(message.contains("calendar")),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn unknown_customer_is_not_found() {
    let store = MemoryStore::default();

    match check_eligibility(&store, &policy(), &request(CustomerId(77)), today()) {
        Err(LendingError::CustomerNotFound(CustomerId(77))) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}
