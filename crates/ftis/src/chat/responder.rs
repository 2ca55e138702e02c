use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::intent::{classify, Disease, DiseaseAspect, FeverAspect, Intent};
use super::knowledge::{KnowledgeBase, KnowledgeEntry};

pub const GREETINGS: [&str; 3] = [
    "Hello! I'm FTIS Medical Assistant. I can help answer questions about fevers, diseases, and general health information. What would you like to know?",
    "Hi there! I'm here to provide medical information about fevers and related conditions. How can I assist you today?",
    "Welcome! I'm your medical information assistant. I can explain symptoms, treatments, and prevention methods for various fever-related illnesses.",
];

pub const FAREWELLS: [&str; 3] = [
    "You're welcome! Remember, I'm not a substitute for professional medical advice. Stay healthy!",
    "Glad I could help! Please consult a healthcare provider for personalized medical advice.",
    "Take care! If symptoms worsen or you have concerns, please seek medical attention.",
];

pub const FALLBACKS: [&str; 4] = [
    "I'm not sure I understand. Could you try asking about specific diseases like dengue, malaria, typhoid, or COVID-19?",
    "I specialize in fever-related medical information. Try asking about symptoms, treatments, or prevention for specific conditions.",
    "I can help with information about fevers, dengue, malaria, typhoid, and COVID-19. What would you like to know?",
    "Please ask about specific fever-related topics like symptoms, causes, treatments, or prevention methods.",
];

pub const DISCLAIMER: &str = "---\n*Note: I'm an AI assistant providing general information. I'm not a substitute for professional medical advice, diagnosis, or treatment.*";

pub const EMERGENCY_RESPONSE: &str = "🚨 **MEDICAL EMERGENCY ADVICE** 🚨

If you or someone else is experiencing:
• Difficulty breathing or shortness of breath
• Chest pain or pressure
• Severe bleeding that won't stop
• Confusion or loss of consciousness
• Seizures or convulsions
• Severe allergic reaction

**Call emergency services immediately! (911 or your local emergency number)**

Do not rely on chatbot advice for emergency situations.";

const SYMPTOMS_RESPONSE: &str = "**Common Fever Symptoms**:\n• High temperature\n• Headache\n• Body pain and muscle aches\n• Chills and sweating\n• Fatigue and weakness\n• Loss of appetite\n\nSpecific diseases have additional symptoms - ask about dengue, malaria, or typhoid for details.";

const TREATMENT_RESPONSE: &str = "**General Fever Treatment**:\n• Rest and adequate sleep\n• Drink plenty of fluids\n• Take fever reducers as directed\n• Use cool compresses\n• Wear lightweight clothing\n\nTreatment depends on the specific condition. Always consult a doctor for proper diagnosis and treatment.";

const PREVENTION_RESPONSE: &str = "**General Fever Prevention**:\n• Practice good hand hygiene\n• Avoid close contact with sick individuals\n• Maintain a healthy immune system\n• Get vaccinated when available\n• Use mosquito protection in endemic areas\n\nSpecific prevention methods vary by disease.";

const HOME_CARE_RESPONSE: &str = "**Fever Home Care Tips**:\n• Drink water, broth, or electrolyte solutions\n• Rest in a comfortable environment\n• Take acetaminophen or ibuprofen as directed\n• Use lukewarm sponge baths\n• Monitor temperature regularly\n• Watch for warning signs that need medical attention";

const DURATION_RESPONSE: &str = "**Typical Fever Duration**:\n• Viral fevers: 3-7 days\n• Bacterial infections: Varies with treatment\n• Dengue fever: 2-7 days\n• Malaria: Cyclic patterns\n• COVID-19: 1-2 weeks\n\nConsult a doctor if fever lasts more than 3 days or is accompanied by severe symptoms.";

const OVERVIEW_SYMPTOM_COUNT: usize = 4;

/// Canned starter questions offered next to the chat input.
pub const SUGGESTIONS: [&str; 8] = [
    "What is dengue fever and its symptoms?",
    "How to treat malaria at home?",
    "What are the warning signs for fever?",
    "How to prevent typhoid fever?",
    "What's the difference between viral fever and COVID-19?",
    "When should I go to hospital for fever?",
    "What home remedies help reduce fever?",
    "How long does a typical fever last?",
];

pub fn suggestions() -> &'static [&'static str] {
    &SUGGESTIONS
}

/// Canned-response assistant. The RNG only picks among greeting, farewell, and fallback variants.
pub struct ChatResponder<R = StdRng> {
    knowledge: KnowledgeBase,
    rng: R,
}

impl ChatResponder<StdRng> {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self::with_rng(knowledge, StdRng::from_entropy())
    }

    pub fn seeded(knowledge: KnowledgeBase, seed: u64) -> Self {
        Self::with_rng(knowledge, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChatResponder<R> {
    pub fn with_rng(knowledge: KnowledgeBase, rng: R) -> Self {
        Self { knowledge, rng }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn respond(&mut self, message: &str) -> String {
        respond_with(message, &self.knowledge, &mut self.rng)
    }
}

/// Stateless form of [`ChatResponder::respond`] backed by the thread-local RNG.
pub fn chat_respond(message: &str, knowledge: &KnowledgeBase) -> String {
    respond_with(message, knowledge, &mut rand::thread_rng())
}

fn respond_with<R: Rng + ?Sized>(message: &str, knowledge: &KnowledgeBase, rng: &mut R) -> String {
    let intent = classify(message);
    debug!(?intent, "chat intent classified");

    match intent {
        Intent::Greeting => pick(&GREETINGS, rng).to_string(),
        Intent::Farewell => pick(&FAREWELLS, rng).to_string(),
        Intent::Emergency => EMERGENCY_RESPONSE.to_string(),
        Intent::Disease { disease, aspect } => disease_response(disease, aspect, knowledge),
        Intent::Fever { aspect } => fever_response(aspect, knowledge),
        Intent::Symptoms => SYMPTOMS_RESPONSE.to_string(),
        Intent::Treatment => TREATMENT_RESPONSE.to_string(),
        Intent::Prevention => PREVENTION_RESPONSE.to_string(),
        Intent::HomeCare => HOME_CARE_RESPONSE.to_string(),
        Intent::Duration => DURATION_RESPONSE.to_string(),
        Intent::Unknown => format!("{}\n\n{}", pick(&FALLBACKS, rng), DISCLAIMER),
    }
}

fn pick<'a, R: Rng + ?Sized>(options: &[&'a str], rng: &mut R) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn bullets(items: &[String]) -> String {
    items.join("\n• ")
}

fn disease_response(disease: Disease, aspect: DiseaseAspect, knowledge: &KnowledgeBase) -> String {
    let Some(entry) = knowledge.get(disease.key()) else {
        return format!(
            "I don't have specific information about {} in my knowledge base.",
            disease.key()
        );
    };
    let title = disease.key().to_uppercase();

    match aspect {
        DiseaseAspect::Definition => format!("**{title}**: {}", entry.definition),
        DiseaseAspect::Symptoms => {
            format!("**{title} SYMPTOMS**:\n• {}", bullets(&entry.symptoms))
        }
        DiseaseAspect::Treatment => {
            format!("**{title} TREATMENT**:\n• {}", bullets(&entry.treatment))
        }
        DiseaseAspect::Prevention => {
            format!("**{title} PREVENTION**:\n• {}", bullets(&entry.prevention))
        }
        DiseaseAspect::Overview => disease_overview(&title, entry),
    }
}

fn disease_overview(title: &str, entry: &KnowledgeEntry) -> String {
    let key_symptoms = &entry.symptoms[..entry.symptoms.len().min(OVERVIEW_SYMPTOM_COUNT)];
    let first = |items: &[String]| items.first().cloned().unwrap_or_default();
    format!(
        "**{title} OVERVIEW**:\n{}\n\n**KEY SYMPTOMS**:\n• {}\n\n**TREATMENT**: {}\n**PREVENTION**: {}",
        entry.definition,
        bullets(key_symptoms),
        first(&entry.treatment),
        first(&entry.prevention),
    )
}

fn fever_response(aspect: FeverAspect, knowledge: &KnowledgeBase) -> String {
    let Some(entry) = knowledge.get("fever") else {
        return "I don't have specific information about fever in my knowledge base.".to_string();
    };

    match aspect {
        FeverAspect::Definition => format!("**FEVER**: {}", entry.definition),
        FeverAspect::Causes => {
            format!("**COMMON CAUSES OF FEVER**:\n• {}", bullets(&entry.causes))
        }
        FeverAspect::HomeCare => format!("**FEVER HOME CARE**:\n• {}", bullets(&entry.home_care)),
        FeverAspect::WarningSigns => format!(
            "**SEEK MEDICAL ATTENTION IF YOU HAVE**:\n• {}",
            bullets(&entry.warning_signs)
        ),
        FeverAspect::Overview => format!(
            "**FEVER INFORMATION**:\n{}\n\nFor specific information, ask about:\n• Causes of fever\n• Home care tips\n• Warning signs\n• When to see a doctor",
            entry.definition
        ),
    }
}
