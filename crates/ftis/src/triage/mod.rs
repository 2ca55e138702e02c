//! Rule-based fever triage: risk score, level, candidate diagnoses, explanations, and advice.
//!
//! Every function here is total and deterministic; no learned model is involved.

pub mod diagnosis;
pub mod domain;
pub mod engine;
pub mod explanation;
pub mod recommendation;
pub mod scoring;

pub use diagnosis::{diagnoses, diagnosis_distribution, MAX_DIAGNOSES};
pub use domain::{
    Condition, Diagnosis, Feature, FeatureImpact, PatientObservation, TriageColor, TriageLevel,
    TriageResult, UnknownTriageLevel, DEFAULT_PLATELET_COUNT,
};
pub use engine::{case_id_for, sequenced_case_id, TriageEngine};
pub use explanation::{explanations, feature_impacts, MAX_EXPLANATIONS};
pub use recommendation::{recommendation, suggested_tests, FALLBACK_RECOMMENDATION};
pub use scoring::{
    score, score_breakdown, ScoreBreakdown, ScoreComponent, ScoreFactor, MAX_SCORE, MIN_SCORE,
};
