use std::cmp::Ordering;

use super::domain::{round3, Condition, Diagnosis, PatientObservation};

/// Prior weights aligned with `Condition::ALL`.
const BASE_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];

const DENGUE_BOOST: f64 = 0.30;
const MALARIA_BOOST: f64 = 0.30;
const TYPHOID_BOOST: f64 = 0.20;
const COVID_BOOST: f64 = 0.30;

pub const MAX_DIAGNOSES: usize = 3;

/// Normalized probability for every candidate, in `Condition::ALL` order, before ranking.
pub fn diagnosis_distribution(observation: &PatientObservation) -> Vec<Diagnosis> {
    let mut weights = BASE_WEIGHTS;

    if observation.rash && observation.effective_platelets() < 150 {
        weights[0] += DENGUE_BOOST;
    }
    if observation.travel_history && observation.mosquito_exposure {
        weights[1] += MALARIA_BOOST;
    }
    if observation.duration_days > 5 {
        weights[2] += TYPHOID_BOOST;
    }
    if observation.breathing_difficulty {
        weights[4] += COVID_BOOST;
    }

    let total: f64 = weights.iter().sum();
    Condition::ALL
        .iter()
        .zip(weights)
        .map(|(label, weight)| Diagnosis {
            label: *label,
            probability: weight / total,
        })
        .collect()
}

/// Top candidates by probability, rounded to three decimals.
///
/// Renormalization happens over all five candidates, so the returned subset usually sums to
/// less than 1.0.
pub fn diagnoses(observation: &PatientObservation) -> Vec<Diagnosis> {
    let mut ranked = diagnosis_distribution(observation);
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(MAX_DIAGNOSES);
    for diagnosis in &mut ranked {
        diagnosis.probability = round3(diagnosis.probability);
    }
    ranked
}
