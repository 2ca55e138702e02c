use std::cmp::Ordering;

use super::domain::{round3, Feature, FeatureImpact, PatientObservation, DEFAULT_PLATELET_COUNT};

pub const MAX_EXPLANATIONS: usize = 3;

const BASELINE_TEMPERATURE: f64 = 37.0;
const TEMPERATURE_IMPACT_CAP: f64 = 3.0;
const BREATHING_DIFFICULTY_IMPACT: f64 = 0.8;
const RASH_IMPACT: f64 = 0.6;

/// Raw impact for every feature in a fixed order, including zero and negative entries.
pub fn feature_impacts(observation: &PatientObservation) -> Vec<FeatureImpact> {
    let platelet_impact = observation
        .platelet_count
        .map(|count| ((f64::from(DEFAULT_PLATELET_COUNT) - f64::from(count)) / 100.0).max(0.0))
        .unwrap_or(0.0);

    vec![
        FeatureImpact {
            feature: Feature::Temperature,
            impact: (observation.temperature - BASELINE_TEMPERATURE).min(TEMPERATURE_IMPACT_CAP),
        },
        FeatureImpact {
            feature: Feature::BreathingDifficulty,
            impact: if observation.breathing_difficulty {
                BREATHING_DIFFICULTY_IMPACT
            } else {
                0.0
            },
        },
        FeatureImpact {
            feature: Feature::PlateletCount,
            impact: platelet_impact,
        },
        FeatureImpact {
            feature: Feature::Rash,
            impact: if observation.rash { RASH_IMPACT } else { 0.0 },
        },
        FeatureImpact {
            feature: Feature::DurationDays,
            impact: (f64::from(observation.duration_days) / 5.0).min(1.0),
        },
    ]
}

/// Strongest positive contributors, rounded to three decimals.
pub fn explanations(observation: &PatientObservation) -> Vec<FeatureImpact> {
    let mut ranked: Vec<FeatureImpact> = feature_impacts(observation)
        .into_iter()
        .filter(|entry| entry.impact > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));
    ranked.truncate(MAX_EXPLANATIONS);
    for entry in &mut ranked {
        entry.impact = round3(entry.impact);
    }
    ranked
}
