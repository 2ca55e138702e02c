use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Platelet count assumed when the intake form leaves the lab value blank.
pub const DEFAULT_PLATELET_COUNT: u32 = 250;

/// Vitals, symptoms, and exposure history captured for a single triage submission.
///
/// Symptom and exposure flags accept either JSON booleans or the `0`/`1` integers posted by the
/// intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    /// Body temperature in degrees Celsius.
    pub temperature: f64,
    pub duration_days: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub headache: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub body_pain: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub rash: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub nausea_vomiting: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub breathing_difficulty: bool,
    #[serde(default)]
    pub platelet_count: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub travel_history: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub mosquito_exposure: bool,
}

impl PatientObservation {
    /// Observation with the given vitals and every symptom and exposure flag cleared.
    pub fn new(temperature: f64, duration_days: u32) -> Self {
        Self {
            temperature,
            duration_days,
            headache: false,
            body_pain: false,
            rash: false,
            nausea_vomiting: false,
            breathing_difficulty: false,
            platelet_count: None,
            travel_history: false,
            mosquito_exposure: false,
        }
    }

    pub fn effective_platelets(&self) -> u32 {
        self.platelet_count.unwrap_or(DEFAULT_PLATELET_COUNT)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(value) => value,
        FlagRepr::Int(value) => value != 0,
    })
}

/// Discrete acuity bucket derived from the triage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    Mild,
    Moderate,
    High,
    Critical,
}

impl TriageLevel {
    pub const ALL: [TriageLevel; 4] = [
        TriageLevel::Mild,
        TriageLevel::Moderate,
        TriageLevel::High,
        TriageLevel::Critical,
    ];

    /// Maps a score onto its level using the fixed thresholds (13, 9, 5).
    pub fn from_score(score: u8) -> Self {
        if score >= 13 {
            TriageLevel::Critical
        } else if score >= 9 {
            TriageLevel::High
        } else if score >= 5 {
            TriageLevel::Moderate
        } else {
            TriageLevel::Mild
        }
    }

    pub fn color(self) -> TriageColor {
        match self {
            TriageLevel::Mild => TriageColor::Green,
            TriageLevel::Moderate => TriageColor::Yellow,
            TriageLevel::High => TriageColor::Orange,
            TriageLevel::Critical => TriageColor::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TriageLevel::Mild => "Mild",
            TriageLevel::Moderate => "Moderate",
            TriageLevel::High => "High",
            TriageLevel::Critical => "Critical",
        }
    }

    /// High and Critical cases are escalated on the dashboards.
    pub fn is_urgent(self) -> bool {
        matches!(self, TriageLevel::High | TriageLevel::Critical)
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a triage level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown triage level '{0}'")]
pub struct UnknownTriageLevel(pub String);

impl FromStr for TriageLevel {
    type Err = UnknownTriageLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(TriageLevel::Mild),
            "moderate" => Ok(TriageLevel::Moderate),
            "high" => Ok(TriageLevel::High),
            "critical" => Ok(TriageLevel::Critical),
            _ => Err(UnknownTriageLevel(value.to_string())),
        }
    }
}

/// Display color paired with each triage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl TriageColor {
    pub fn label(self) -> &'static str {
        match self {
            TriageColor::Green => "green",
            TriageColor::Yellow => "yellow",
            TriageColor::Orange => "orange",
            TriageColor::Red => "red",
        }
    }
}

/// Fixed candidate set for diagnosis estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    Dengue,
    Malaria,
    Typhoid,
    #[serde(rename = "Viral_Fever")]
    ViralFever,
    #[serde(rename = "COVID")]
    Covid,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Dengue,
        Condition::Malaria,
        Condition::Typhoid,
        Condition::ViralFever,
        Condition::Covid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Condition::Dengue => "Dengue",
            Condition::Malaria => "Malaria",
            Condition::Typhoid => "Typhoid",
            Condition::ViralFever => "Viral_Fever",
            Condition::Covid => "COVID",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate condition with its estimated probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub label: Condition,
    #[serde(rename = "prob")]
    pub probability: f64,
}

/// Observation fields that can feature in the triage narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Temperature,
    BreathingDifficulty,
    PlateletCount,
    Rash,
    DurationDays,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::Temperature => "temperature",
            Feature::BreathingDifficulty => "breathing_difficulty",
            Feature::PlateletCount => "platelet_count",
            Feature::Rash => "rash",
            Feature::DurationDays => "duration_days",
        }
    }
}

/// Unit-less contribution of a feature; not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: Feature,
    pub impact: f64,
}

/// Complete assessment returned for one triage submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    #[serde(rename = "triage_score")]
    pub score: u8,
    #[serde(rename = "triage_level")]
    pub level: TriageLevel,
    #[serde(rename = "triage_color")]
    pub color: TriageColor,
    pub diagnoses: Vec<Diagnosis>,
    pub explanations: Vec<FeatureImpact>,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_tests: Option<String>,
    pub case_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl TriageResult {
    pub fn top_diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnoses.first()
    }
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_thresholds_follow_score_bands() {
        assert_eq!(TriageLevel::from_score(1), TriageLevel::Mild);
        assert_eq!(TriageLevel::from_score(4), TriageLevel::Mild);
        assert_eq!(TriageLevel::from_score(5), TriageLevel::Moderate);
        assert_eq!(TriageLevel::from_score(8), TriageLevel::Moderate);
        assert_eq!(TriageLevel::from_score(9), TriageLevel::High);
        assert_eq!(TriageLevel::from_score(12), TriageLevel::High);
        assert_eq!(TriageLevel::from_score(13), TriageLevel::Critical);
        assert_eq!(TriageLevel::from_score(20), TriageLevel::Critical);
    }

    #[test]
    fn colors_track_levels() {
        assert_eq!(TriageLevel::Mild.color(), TriageColor::Green);
        assert_eq!(TriageLevel::Moderate.color(), TriageColor::Yellow);
        assert_eq!(TriageLevel::High.color(), TriageColor::Orange);
        assert_eq!(TriageLevel::Critical.color(), TriageColor::Red);
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!("critical".parse::<TriageLevel>(), Ok(TriageLevel::Critical));
        assert_eq!(" High ".parse::<TriageLevel>(), Ok(TriageLevel::High));
        assert!("severe".parse::<TriageLevel>().is_err());
    }

    #[test]
    fn observation_accepts_integer_flags_and_defaults() {
        let observation: PatientObservation = serde_json::from_value(json!({
            "temperature": 39.1,
            "duration_days": 4,
            "headache": 1,
            "rash": 0,
            "breathing_difficulty": true
        }))
        .expect("observation parses");

        assert!(observation.headache);
        assert!(!observation.rash);
        assert!(observation.breathing_difficulty);
        assert!(!observation.travel_history);
        assert_eq!(observation.platelet_count, None);
        assert_eq!(observation.effective_platelets(), DEFAULT_PLATELET_COUNT);
    }

    #[test]
    fn condition_labels_match_wire_names() {
        let value = serde_json::to_value(Condition::ViralFever).expect("serializes");
        assert_eq!(value, json!("Viral_Fever"));
        let value = serde_json::to_value(Condition::Covid).expect("serializes");
        assert_eq!(value, json!("COVID"));
        assert_eq!(Condition::Covid.label(), "COVID");
    }
}
