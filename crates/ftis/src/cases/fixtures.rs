//! Seeded sample cases for dashboard demos and tests.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::domain::{CaseIntake, CaseStatus, CaseUpdate, TriageResponse};
use super::repository::CaseRepository;
use super::service::{CaseService, CaseServiceError};
use crate::triage::PatientObservation;

const GENDERS: [&str; 2] = ["Male", "Female"];
const DOCTORS: [&str; 5] = ["Dr. Smith", "Dr. Johnson", "Dr. Williams", "Dr. Brown", "Dr. Jones"];
const COMPLETED_NOTES: &str = "Patient responded well to treatment.";
const COMPLETED_PLAN: &str = "Continue medication and follow up in 1 week.";
/// Generated cases are spread across the week before the seeding instant.
const LOOKBACK_MINUTES: i64 = 7 * 24 * 60;

/// Generated intake with a submission offset and an optional clinician review.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCase {
    pub intake: CaseIntake,
    pub minutes_ago: i64,
    pub review: Option<CaseUpdate>,
}

/// Deterministic generator of plausible fever presentations.
pub struct SampleCaseFactory {
    rng: StdRng,
    sequence: u32,
}

impl SampleCaseFactory {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sequence: 1000,
        }
    }

    pub fn next_case(&mut self) -> SampleCase {
        let intake = self.next_intake();
        let minutes_ago = self.rng.gen_range(0..LOOKBACK_MINUTES);
        let review = self.next_review();
        SampleCase {
            intake,
            minutes_ago,
            review,
        }
    }

    pub fn next_intake(&mut self) -> CaseIntake {
        let rng = &mut self.rng;
        let temperature = (rng.gen_range(37.0..41.5_f64) * 10.0).round() / 10.0;
        let duration_days = rng.gen_range(1..=10);
        let observation = PatientObservation {
            headache: rng.gen_bool(0.7),
            body_pain: rng.gen_bool(0.8),
            rash: rng.gen_bool(0.3),
            nausea_vomiting: rng.gen_bool(0.4),
            breathing_difficulty: rng.gen_bool(0.15),
            platelet_count: rng.gen_bool(0.7).then(|| rng.gen_range(40..=350)),
            travel_history: rng.gen_bool(0.3),
            mosquito_exposure: rng.gen_bool(0.4),
            ..PatientObservation::new(temperature, duration_days)
        };

        let sequence = self.sequence;
        self.sequence += 1;

        CaseIntake {
            patient_name: format!("Patient {sequence}"),
            patient_age: Some(self.rng.gen_range(20..80)),
            patient_gender: GENDERS.choose(&mut self.rng).map(|gender| gender.to_string()),
            observation,
        }
    }

    fn next_review(&mut self) -> Option<CaseUpdate> {
        let status = *CaseStatus::ALL.choose(&mut self.rng)?;
        let doctor = DOCTORS.choose(&mut self.rng).map(|name| name.to_string());
        match status {
            CaseStatus::Pending => None,
            CaseStatus::Reviewing => Some(CaseUpdate {
                status: Some(status),
                assigned_doctor: doctor,
                ..CaseUpdate::default()
            }),
            CaseStatus::Completed => Some(CaseUpdate {
                status: Some(status),
                assigned_doctor: doctor,
                doctor_notes: Some(COMPLETED_NOTES.to_string()),
                treatment_plan: Some(COMPLETED_PLAN.to_string()),
                ..CaseUpdate::default()
            }),
        }
    }
}

impl Iterator for SampleCaseFactory {
    type Item = SampleCase;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_case())
    }
}

/// Submits `count` generated cases, applying each sample's review after submission.
pub fn seed_cases<R>(
    service: &CaseService<R>,
    count: usize,
    seed: u64,
    now: DateTime<Utc>,
) -> Result<Vec<TriageResponse>, CaseServiceError>
where
    R: CaseRepository + 'static,
{
    let mut responses = Vec::with_capacity(count);
    for sample in SampleCaseFactory::seeded(seed).take(count) {
        let submitted_at = now - Duration::minutes(sample.minutes_ago);
        let response = service.submit_at(sample.intake, submitted_at)?;
        if let Some(mut review) = sample.review {
            if review.status == Some(CaseStatus::Completed) {
                review.final_diagnosis = response
                    .result
                    .top_diagnosis()
                    .map(|diagnosis| diagnosis.label.to_string());
            }
            let reviewed_at = (submitted_at + Duration::hours(2)).min(now);
            service.update_at(response.db_id, review, reviewed_at)?;
        }
        responses.push(response);
    }
    Ok(responses)
}
