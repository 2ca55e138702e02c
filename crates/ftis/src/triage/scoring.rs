use serde::{Deserialize, Serialize};

use super::domain::PatientObservation;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 20;

/// Highest-first temperature bands in °C.
const TEMPERATURE_BANDS: [(f64, u8); 3] = [(40.0, 4), (39.0, 3), (38.5, 2)];
/// Highest-first illness duration bands in days.
const DURATION_BANDS: [(u32, u8); 3] = [(7, 4), (5, 3), (3, 2)];
/// Lowest-first platelet bands; a count strictly below the threshold earns the points.
const PLATELET_BANDS: [(u32, u8); 3] = [(50, 5), (100, 4), (150, 3)];

const HEADACHE_POINTS: u8 = 1;
const BODY_PAIN_POINTS: u8 = 1;
const RASH_POINTS: u8 = 2;
const NAUSEA_VOMITING_POINTS: u8 = 2;
const BREATHING_DIFFICULTY_POINTS: u8 = 4;
const TRAVEL_HISTORY_POINTS: u8 = 2;
const MOSQUITO_EXPOSURE_POINTS: u8 = 1;

/// Rule that contributed points to a triage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Temperature,
    Duration,
    Headache,
    BodyPain,
    Rash,
    NauseaVomiting,
    BreathingDifficulty,
    PlateletCount,
    TravelHistory,
    MosquitoExposure,
}

/// Discrete contribution to a score, kept for audit trails and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u8,
    pub notes: String,
}

/// Full derivation of a triage score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    /// Sum of every component before clamping.
    pub raw_total: u16,
    pub score: u8,
}

/// Additive point score clamped to `[MIN_SCORE, MAX_SCORE]`.
pub fn score(observation: &PatientObservation) -> u8 {
    score_breakdown(observation).score
}

pub fn score_breakdown(observation: &PatientObservation) -> ScoreBreakdown {
    let mut components = Vec::new();

    if let Some(points) = highest_band(observation.temperature, &TEMPERATURE_BANDS) {
        components.push(ScoreComponent {
            factor: ScoreFactor::Temperature,
            points,
            notes: format!("temperature {:.1}°C", observation.temperature),
        });
    }

    if let Some(points) = highest_band(observation.duration_days, &DURATION_BANDS) {
        components.push(ScoreComponent {
            factor: ScoreFactor::Duration,
            points,
            notes: format!("fever for {} day(s)", observation.duration_days),
        });
    }

    let flags = [
        (observation.headache, ScoreFactor::Headache, HEADACHE_POINTS, "headache"),
        (observation.body_pain, ScoreFactor::BodyPain, BODY_PAIN_POINTS, "body pain"),
        (observation.rash, ScoreFactor::Rash, RASH_POINTS, "rash"),
        (
            observation.nausea_vomiting,
            ScoreFactor::NauseaVomiting,
            NAUSEA_VOMITING_POINTS,
            "nausea or vomiting",
        ),
        (
            observation.breathing_difficulty,
            ScoreFactor::BreathingDifficulty,
            BREATHING_DIFFICULTY_POINTS,
            "breathing difficulty",
        ),
    ];
    for (present, factor, points, label) in flags {
        if present {
            components.push(ScoreComponent {
                factor,
                points,
                notes: label.to_string(),
            });
        }
    }

    let platelets = observation.effective_platelets();
    if let Some(points) = PLATELET_BANDS
        .iter()
        .find(|(threshold, _)| platelets < *threshold)
        .map(|(_, points)| *points)
    {
        components.push(ScoreComponent {
            factor: ScoreFactor::PlateletCount,
            points,
            notes: format!("platelet count {platelets}k/µL"),
        });
    }

    if observation.travel_history {
        components.push(ScoreComponent {
            factor: ScoreFactor::TravelHistory,
            points: TRAVEL_HISTORY_POINTS,
            notes: "recent travel".to_string(),
        });
    }
    if observation.mosquito_exposure {
        components.push(ScoreComponent {
            factor: ScoreFactor::MosquitoExposure,
            points: MOSQUITO_EXPOSURE_POINTS,
            notes: "mosquito exposure".to_string(),
        });
    }

    let raw_total: u16 = components
        .iter()
        .map(|component| u16::from(component.points))
        .sum();
    let score = raw_total.clamp(u16::from(MIN_SCORE), u16::from(MAX_SCORE)) as u8;

    ScoreBreakdown {
        components,
        raw_total,
        score,
    }
}

fn highest_band<T: PartialOrd + Copy>(value: T, bands: &[(T, u8)]) -> Option<u8> {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
}
