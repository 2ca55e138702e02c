use super::domain::{Condition, TriageLevel};

pub const FALLBACK_RECOMMENDATION: &str = "Consult healthcare provider for assessment.";

impl TriageLevel {
    /// Fixed advisory text for the level.
    pub fn recommendation(self) -> &'static str {
        match self {
            TriageLevel::Critical => "Seek emergency care immediately. Go to hospital ER now.",
            TriageLevel::High => {
                "Urgent doctor visit required within 12 hours. Consider CBC + specific tests."
            }
            TriageLevel::Moderate => {
                "Schedule clinic appointment within 24-48 hours. Monitor symptoms closely."
            }
            TriageLevel::Mild => {
                "Home care with rest, fluids, and fever medication. Monitor for worsening."
            }
        }
    }
}

/// Advisory lookup by level label; anything that is not a level gets the generic fallback.
pub fn recommendation(level: &str) -> &'static str {
    level
        .parse::<TriageLevel>()
        .map(TriageLevel::recommendation)
        .unwrap_or(FALLBACK_RECOMMENDATION)
}

/// Confirmatory lab work for the leading candidate.
pub fn suggested_tests(condition: Condition) -> &'static str {
    match condition {
        Condition::Dengue => "NS1 antigen test, CBC with platelet count",
        Condition::Malaria => "Malaria parasite test, CBC",
        Condition::Typhoid => "Widal test, Blood culture",
        Condition::Covid => "RT-PCR test, Chest X-ray if breathing difficulty",
        Condition::ViralFever => "CBC, CRP if prolonged fever",
    }
}
