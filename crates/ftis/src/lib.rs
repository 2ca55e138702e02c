//! Fever triage: rule-based risk scoring, a canned-response medical assistant, and the case
//! log behind the clinician dashboard.

pub mod cases;
pub mod chat;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;

pub use error::AppError;
