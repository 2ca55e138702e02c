//! Keyword classification of free-text chat messages.
//!
//! Rules are checked in a fixed order and the first match wins. Short conversational keywords
//! (greetings, farewells, "what"/"is") match whole words so that "this" or "children" do not read
//! as "hi". Topic keywords match as substrings so "symptoms" still hits "symptom".

use serde::Serialize;

const GREETING_WORDS: [&str; 4] = ["hello", "hi", "hey", "greetings"];
const FAREWELL_WORDS: [&str; 4] = ["bye", "goodbye", "thanks", "thank you"];
const EMERGENCY_TERMS: [&str; 5] = ["emergency", "urgent", "help now", "critical", "911"];
const SYMPTOM_TERMS: [&str; 4] = ["symptom", "sign", "feel", "experience"];
const TREATMENT_TERMS: [&str; 5] = ["treatment", "cure", "medicine", "medication", "what to do"];
const PREVENTION_TERMS: [&str; 3] = ["prevent", "avoid", "protection"];
const HOME_CARE_TERMS: [&str; 3] = ["home", "care", "remedy"];
const DURATION_TERMS: [&str; 4] = ["how long", "duration", "last", "persist"];

/// Diseases with dedicated knowledge entries, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Dengue,
    Malaria,
    Typhoid,
    Covid,
}

impl Disease {
    pub const ALL: [Disease; 4] = [
        Disease::Dengue,
        Disease::Malaria,
        Disease::Typhoid,
        Disease::Covid,
    ];

    /// Knowledge base key, also the keyword searched for in messages.
    pub fn key(self) -> &'static str {
        match self {
            Disease::Dengue => "dengue",
            Disease::Malaria => "malaria",
            Disease::Typhoid => "typhoid",
            Disease::Covid => "covid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseAspect {
    Definition,
    Symptoms,
    Treatment,
    Prevention,
    Overview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeverAspect {
    Definition,
    Causes,
    HomeCare,
    WarningSigns,
    Overview,
}

/// Classified purpose of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    Emergency,
    Disease {
        disease: Disease,
        aspect: DiseaseAspect,
    },
    Fever {
        aspect: FeverAspect,
    },
    Symptoms,
    Treatment,
    Prevention,
    HomeCare,
    Duration,
    Unknown,
}

/// Lowercased message with a word-padded form for whole-word lookups.
struct Normalized {
    text: String,
    words: String,
}

impl Normalized {
    fn new(message: &str) -> Self {
        let text = message.to_lowercase();
        let joined = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            words: format!(" {joined} "),
            text,
        }
    }

    fn contains(&self, term: &str) -> bool {
        self.text.contains(term)
    }

    fn contains_any(&self, terms: &[&str]) -> bool {
        terms.iter().any(|term| self.contains(term))
    }

    fn has_word(&self, words: &[&str]) -> bool {
        words
            .iter()
            .any(|word| self.words.contains(&format!(" {word} ")))
    }
}

pub fn classify(message: &str) -> Intent {
    let message = Normalized::new(message);

    if message.has_word(&GREETING_WORDS) {
        return Intent::Greeting;
    }
    if message.has_word(&FAREWELL_WORDS) {
        return Intent::Farewell;
    }
    if message.contains_any(&EMERGENCY_TERMS) {
        return Intent::Emergency;
    }
    if let Some(disease) = Disease::ALL
        .into_iter()
        .find(|disease| message.contains(disease.key()))
    {
        return Intent::Disease {
            disease,
            aspect: disease_aspect(&message),
        };
    }
    if message.contains("fever") {
        return Intent::Fever {
            aspect: fever_aspect(&message),
        };
    }
    if message.contains_any(&SYMPTOM_TERMS) {
        return Intent::Symptoms;
    }
    if message.contains_any(&TREATMENT_TERMS) {
        return Intent::Treatment;
    }
    if message.contains_any(&PREVENTION_TERMS) {
        return Intent::Prevention;
    }
    if message.contains_any(&HOME_CARE_TERMS) {
        return Intent::HomeCare;
    }
    if message.contains_any(&DURATION_TERMS) {
        return Intent::Duration;
    }
    Intent::Unknown
}

fn disease_aspect(message: &Normalized) -> DiseaseAspect {
    if message.has_word(&["what", "define", "is"]) {
        DiseaseAspect::Definition
    } else if message.contains("symptom") {
        DiseaseAspect::Symptoms
    } else if message.contains_any(&["treatment", "cure", "medicine"]) {
        DiseaseAspect::Treatment
    } else if message.contains("prevent") {
        DiseaseAspect::Prevention
    } else {
        DiseaseAspect::Overview
    }
}

fn fever_aspect(message: &Normalized) -> FeverAspect {
    if message.has_word(&["what", "define"]) {
        FeverAspect::Definition
    } else if message.contains("cause") {
        FeverAspect::Causes
    } else if message.contains_any(&["treatment", "home", "care"]) {
        FeverAspect::HomeCare
    } else if message.contains_any(&["warning", "danger", "emergency"]) {
        FeverAspect::WarningSigns
    } else {
        FeverAspect::Overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_win_over_everything_else() {
        assert_eq!(classify("Hi, what is dengue?"), Intent::Greeting);
        assert_eq!(classify("hello"), Intent::Greeting);
    }

    #[test]
    fn greeting_words_do_not_match_inside_other_words() {
        assert_eq!(
            classify("Is this malaria treatment safe for children?"),
            Intent::Disease {
                disease: Disease::Malaria,
                aspect: DiseaseAspect::Definition,
            }
        );
    }

    #[test]
    fn farewell_phrases_match() {
        assert_eq!(classify("Thank you so much"), Intent::Farewell);
        assert_eq!(classify("ok bye"), Intent::Farewell);
    }

    #[test]
    fn emergency_beats_disease_keywords() {
        assert_eq!(classify("help now emergency"), Intent::Emergency);
        assert_eq!(classify("dengue critical bleeding"), Intent::Emergency);
    }

    #[test]
    fn disease_sub_dispatch_follows_keyword_order() {
        let aspect = |message| match classify(message) {
            Intent::Disease { aspect, .. } => aspect,
            other => panic!("expected disease intent, got {other:?}"),
        };
        assert_eq!(aspect("What is dengue?"), DiseaseAspect::Definition);
        assert_eq!(aspect("typhoid symptoms"), DiseaseAspect::Symptoms);
        assert_eq!(aspect("malaria cure"), DiseaseAspect::Treatment);
        assert_eq!(aspect("how to prevent covid"), DiseaseAspect::Prevention);
        assert_eq!(aspect("tell me about dengue"), DiseaseAspect::Overview);
    }

    #[test]
    fn first_listed_disease_wins() {
        assert_eq!(
            classify("dengue or malaria symptoms"),
            Intent::Disease {
                disease: Disease::Dengue,
                aspect: DiseaseAspect::Symptoms,
            }
        );
    }

    #[test]
    fn fever_sub_dispatch() {
        let aspect = |message| match classify(message) {
            Intent::Fever { aspect } => aspect,
            other => panic!("expected fever intent, got {other:?}"),
        };
        assert_eq!(aspect("what exactly is a fever"), FeverAspect::Definition);
        assert_eq!(aspect("fever causes"), FeverAspect::Causes);
        assert_eq!(aspect("home remedies for fever"), FeverAspect::HomeCare);
        assert_eq!(aspect("fever danger signs"), FeverAspect::WarningSigns);
        assert_eq!(aspect("I have a fever"), FeverAspect::Overview);
    }

    #[test]
    fn generic_buckets_in_order() {
        assert_eq!(classify("I feel weak"), Intent::Symptoms);
        assert_eq!(classify("which medication works"), Intent::Treatment);
        assert_eq!(classify("how do I avoid getting sick"), Intent::Prevention);
        assert_eq!(classify("any remedy"), Intent::HomeCare);
        assert_eq!(classify("how long will it persist"), Intent::Duration);
        assert_eq!(classify("tell me a joke"), Intent::Unknown);
    }
}
