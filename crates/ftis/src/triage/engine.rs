use chrono::{DateTime, Utc};
use tracing::debug;

use super::diagnosis::diagnoses;
use super::domain::{PatientObservation, TriageLevel, TriageResult};
use super::explanation::explanations;
use super::recommendation::suggested_tests;
use super::scoring::score;

/// Stateless assessor combining the scoring, diagnosis, explanation, and advice rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriageEngine;

impl TriageEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(
        &self,
        observation: &PatientObservation,
        submitted_at: DateTime<Utc>,
    ) -> TriageResult {
        let score = score(observation);
        let level = TriageLevel::from_score(score);
        let diagnoses = diagnoses(observation);
        let suggested_tests = match diagnoses.first() {
            Some(top) if level.is_urgent() => Some(suggested_tests(top.label).to_string()),
            _ => None,
        };
        let case_id = case_id_for(submitted_at);

        debug!(%case_id, score, level = level.label(), "triage assessed");

        TriageResult {
            score,
            level,
            color: level.color(),
            diagnoses,
            explanations: explanations(observation),
            recommendation: level.recommendation().to_string(),
            suggested_tests,
            case_id,
            submitted_at,
        }
    }
}

/// Case identifier derived from the submission instant.
pub fn case_id_for(submitted_at: DateTime<Utc>) -> String {
    format!("FTIS-{}", submitted_at.timestamp_millis())
}

/// Stored case identifier; the sequence keeps ids unique within one millisecond.
pub fn sequenced_case_id(submitted_at: DateTime<Utc>, sequence: u64) -> String {
    format!("{}-{sequence:06}", case_id_for(submitted_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::domain::{Condition, TriageColor};
    use chrono::TimeZone;

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn critical_preset_produces_full_assessment() {
        let observation = PatientObservation {
            headache: true,
            body_pain: true,
            nausea_vomiting: true,
            breathing_difficulty: true,
            platelet_count: Some(80),
            travel_history: true,
            mosquito_exposure: true,
            ..PatientObservation::new(40.5, 5)
        };

        let result = TriageEngine::new().assess(&observation, submitted_at());

        assert_eq!(result.score, 20);
        assert_eq!(result.level, TriageLevel::Critical);
        assert_eq!(result.color, TriageColor::Red);
        assert_eq!(result.diagnoses.len(), 3);
        assert_eq!(result.diagnoses[0].label, Condition::Malaria);
        assert_eq!(result.recommendation, TriageLevel::Critical.recommendation());
        assert_eq!(
            result.suggested_tests.as_deref(),
            Some("Malaria parasite test, CBC")
        );
        assert_eq!(result.case_id, "FTIS-1741944600000");
    }

    #[test]
    fn mild_cases_carry_no_test_suggestions() {
        let observation = PatientObservation {
            headache: true,
            body_pain: true,
            platelet_count: Some(280),
            ..PatientObservation::new(37.8, 2)
        };

        let result = TriageEngine::new().assess(&observation, submitted_at());

        assert_eq!(result.level, TriageLevel::Mild);
        assert_eq!(result.color, TriageColor::Green);
        assert!(result.suggested_tests.is_none());
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let result = TriageEngine::new().assess(&PatientObservation::new(39.0, 3), submitted_at());
        let value = serde_json::to_value(&result).expect("serializes");

        assert_eq!(value["triage_score"], 5);
        assert_eq!(value["triage_level"], "Moderate");
        assert_eq!(value["triage_color"], "yellow");
        assert!(value["diagnoses"][0]["prob"].is_number());
        assert!(value.get("suggested_tests").is_none());
    }
}
