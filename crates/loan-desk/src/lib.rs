//! Credit scoring, loan eligibility, and loan issuance for the loan desk service.

pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;
