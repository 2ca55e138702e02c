//! Case log behind the intake form and the clinician dashboard.
//!
//! Every triage submission is stored as a case that clinicians can filter, review, and close.
//! Storage sits behind [`CaseRepository`] so the HTTP layer and tests can swap backends.

pub mod domain;
pub mod fixtures;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CaseFilter, CaseId, CaseIntake, CaseQuery, CaseRecord, CaseStats, CaseStatus, CaseUpdate,
    InvalidCaseFilter, TriageResponse, DEFAULT_CASE_LIMIT, RECENT_CASE_COUNT,
};
pub use fixtures::{seed_cases, SampleCase, SampleCaseFactory};
pub use repository::{CaseRepository, RepositoryError};
pub use router::{case_router, CaseApiState};
pub use service::{CaseService, CaseServiceError};
