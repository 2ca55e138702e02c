use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::{Condition, PatientObservation, TriageLevel, TriageResult};

/// Number of cases returned by a listing when no limit is supplied.
pub const DEFAULT_CASE_LIMIT: usize = 50;
/// Number of newest cases embedded in dashboard statistics.
pub const RECENT_CASE_COUNT: usize = 10;

const ANONYMOUS_PATIENT: &str = "Anonymous";
const ALL_FILTER: &str = "all";

/// Numeric case key assigned by the service in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub u64);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intake form payload: optional demographics alongside the clinical observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseIntake {
    #[serde(default = "anonymous_patient")]
    pub patient_name: String,
    #[serde(default)]
    pub patient_age: Option<u32>,
    #[serde(default)]
    pub patient_gender: Option<String>,
    #[serde(flatten)]
    pub observation: PatientObservation,
}

fn anonymous_patient() -> String {
    ANONYMOUS_PATIENT.to_string()
}

impl CaseIntake {
    pub fn anonymous(observation: PatientObservation) -> Self {
        Self {
            patient_name: anonymous_patient(),
            patient_age: None,
            patient_gender: None,
            observation,
        }
    }
}

/// Clinician workflow state of a stored case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Reviewing,
    Completed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [
        CaseStatus::Pending,
        CaseStatus::Reviewing,
        CaseStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Reviewing => "reviewing",
            CaseStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseStatus {
    type Err = InvalidCaseFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CaseStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| InvalidCaseFilter::Status(value.to_string()))
    }
}

/// Persisted triage submission plus clinician review fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub case_id: String,
    pub timestamp: DateTime<Utc>,
    pub patient_name: String,
    pub patient_age: Option<u32>,
    pub patient_gender: Option<String>,
    #[serde(flatten)]
    pub observation: PatientObservation,
    pub triage_score: u8,
    pub triage_level: TriageLevel,
    pub top_diagnosis: Option<Condition>,
    pub diagnosis_confidence: Option<f64>,
    pub recommendation: String,
    pub status: CaseStatus,
    pub assigned_doctor: Option<String>,
    pub doctor_notes: Option<String>,
    pub final_diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl CaseRecord {
    /// Builds a pending record from an intake and its assessment.
    ///
    /// The stored observation carries the platelet count the scorer actually used.
    pub fn from_assessment(id: CaseId, intake: CaseIntake, result: &TriageResult) -> Self {
        let mut observation = intake.observation;
        observation.platelet_count = Some(observation.effective_platelets());
        let top = result.top_diagnosis();

        Self {
            id,
            case_id: result.case_id.clone(),
            timestamp: result.submitted_at,
            patient_name: intake.patient_name,
            patient_age: intake.patient_age,
            patient_gender: intake.patient_gender,
            observation,
            triage_score: result.score,
            triage_level: result.level,
            top_diagnosis: top.map(|diagnosis| diagnosis.label),
            diagnosis_confidence: top.map(|diagnosis| diagnosis.probability),
            recommendation: result.recommendation.clone(),
            status: CaseStatus::Pending,
            assigned_doctor: None,
            doctor_notes: None,
            final_diagnosis: None,
            treatment_plan: None,
            reviewed_at: None,
        }
    }
}

/// Assessment returned to the intake form, tagged with the stored case key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResponse {
    #[serde(flatten)]
    pub result: TriageResult,
    pub db_id: CaseId,
}

/// Partial clinician edit; absent fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub assigned_doctor: Option<String>,
    #[serde(default)]
    pub doctor_notes: Option<String>,
    #[serde(default)]
    pub final_diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
}

impl CaseUpdate {
    pub fn apply(self, record: &mut CaseRecord, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            record.status = status;
            if status == CaseStatus::Completed {
                record.reviewed_at = Some(now);
            }
        }
        if let Some(doctor) = self.assigned_doctor {
            record.assigned_doctor = Some(doctor);
        }
        if let Some(notes) = self.doctor_notes {
            record.doctor_notes = Some(notes);
        }
        if let Some(diagnosis) = self.final_diagnosis {
            record.final_diagnosis = Some(diagnosis);
        }
        if let Some(plan) = self.treatment_plan {
            record.treatment_plan = Some(plan);
        }
    }
}

/// Raw listing query; `all` or an absent value disables a filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseQuery {
    pub status: Option<String>,
    pub triage_level: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub triage_level: Option<TriageLevel>,
    pub limit: usize,
}

impl Default for CaseFilter {
    fn default() -> Self {
        Self {
            status: None,
            triage_level: None,
            limit: DEFAULT_CASE_LIMIT,
        }
    }
}

impl CaseFilter {
    pub fn matches(&self, record: &CaseRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
            && self
                .triage_level
                .map_or(true, |level| record.triage_level == level)
    }
}

impl TryFrom<CaseQuery> for CaseFilter {
    type Error = InvalidCaseFilter;

    fn try_from(query: CaseQuery) -> Result<Self, Self::Error> {
        let status = match selected(query.status.as_deref()) {
            Some(value) => Some(value.parse::<CaseStatus>()?),
            None => None,
        };
        let triage_level = match selected(query.triage_level.as_deref()) {
            Some(value) => Some(
                value
                    .parse::<TriageLevel>()
                    .map_err(|_| InvalidCaseFilter::TriageLevel(value.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            status,
            triage_level,
            limit: query.limit.unwrap_or(DEFAULT_CASE_LIMIT),
        })
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(ALL_FILTER))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCaseFilter {
    #[error("unknown case status '{0}'")]
    Status(String),
    #[error("unknown triage level '{0}'")]
    TriageLevel(String),
}

/// Dashboard aggregate over every stored case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStats {
    pub total_cases: usize,
    pub pending_cases: usize,
    /// Cases triaged High or Critical.
    pub critical_cases: usize,
    pub status_breakdown: BTreeMap<CaseStatus, usize>,
    pub triage_breakdown: BTreeMap<TriageLevel, usize>,
    pub recent_cases: Vec<CaseRecord>,
}

impl CaseStats {
    /// Aggregates `records`, which must already be ordered newest first.
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        let mut status_breakdown = BTreeMap::new();
        let mut triage_breakdown = BTreeMap::new();
        for record in &records {
            *status_breakdown.entry(record.status).or_insert(0) += 1;
            *triage_breakdown.entry(record.triage_level).or_insert(0) += 1;
        }

        let pending_cases = status_breakdown
            .get(&CaseStatus::Pending)
            .copied()
            .unwrap_or(0);
        let critical_cases = records
            .iter()
            .filter(|record| record.triage_level.is_urgent())
            .count();

        Self {
            total_cases: records.len(),
            pending_cases,
            critical_cases,
            status_breakdown,
            triage_breakdown,
            recent_cases: records.into_iter().take(RECENT_CASE_COUNT).collect(),
        }
    }
}
