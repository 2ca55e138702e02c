use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reference material for one topic. Lists a topic does not cover stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub definition: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub home_care: Vec<String>,
    #[serde(default)]
    pub warning_signs: Vec<String>,
}

/// Static knowledge base keyed by lowercase topic name (`fever`, `dengue`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, KnowledgeEntry>",
    into = "BTreeMap<String, KnowledgeEntry>"
)]
pub struct KnowledgeBase {
    entries: BTreeMap<String, KnowledgeEntry>,
}

impl From<BTreeMap<String, KnowledgeEntry>> for KnowledgeBase {
    fn from(entries: BTreeMap<String, KnowledgeEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |base, (topic, entry)| base.with_entry(&topic, entry))
    }
}

impl From<KnowledgeBase> for BTreeMap<String, KnowledgeEntry> {
    fn from(base: KnowledgeBase) -> Self {
        base.entries
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, topic: &str, entry: KnowledgeEntry) -> Self {
        self.entries.insert(topic.to_ascii_lowercase(), entry);
        self
    }

    pub fn get(&self, topic: &str) -> Option<&KnowledgeEntry> {
        self.entries.get(&topic.to_ascii_lowercase())
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Fever and disease reference content shipped with the assistant.
    pub fn standard() -> Self {
        Self::new()
            .with_entry(
                "fever",
                KnowledgeEntry {
                    definition: "Fever is a temporary increase in body temperature, often a sign that your body is fighting an illness. Normal body temperature is around 37°C (98.6°F).".to_string(),
                    causes: lines(&[
                        "Viral infections (flu, COVID-19, common cold)",
                        "Bacterial infections (strep throat, UTI, pneumonia)",
                        "Inflammatory conditions",
                        "Heat exhaustion",
                        "Certain medications",
                    ]),
                    home_care: lines(&[
                        "Drink plenty of fluids (water, broth, electrolyte solutions)",
                        "Rest and avoid physical exertion",
                        "Use light clothing and keep room temperature comfortable",
                        "Take fever-reducers like acetaminophen or ibuprofen as directed",
                        "Use cool compresses on forehead and wrists",
                    ]),
                    warning_signs: lines(&[
                        "Temperature above 40°C (104°F)",
                        "Fever lasting more than 3 days",
                        "Severe headache or stiff neck",
                        "Difficulty breathing",
                        "Confusion or disorientation",
                        "Seizures",
                        "Rash that doesn't fade under pressure",
                    ]),
                    ..KnowledgeEntry::default()
                },
            )
            .with_entry(
                "dengue",
                KnowledgeEntry {
                    definition: "Dengue is a mosquito-borne viral infection causing flu-like illness that can develop into severe dengue (dengue hemorrhagic fever).".to_string(),
                    symptoms: lines(&[
                        "High fever (40°C/104°F)",
                        "Severe headache",
                        "Pain behind eyes",
                        "Muscle and joint pain",
                        "Nausea and vomiting",
                        "Skin rash",
                        "Mild bleeding (nose or gum bleed)",
                    ]),
                    treatment: lines(&[
                        "No specific antiviral treatment",
                        "Rest and hydration are crucial",
                        "Acetaminophen for fever and pain (avoid aspirin/ibuprofen)",
                        "Monitor platelet count regularly",
                        "Hospitalization if severe symptoms develop",
                    ]),
                    prevention: lines(&[
                        "Use mosquito repellent",
                        "Wear long-sleeved clothing",
                        "Use mosquito nets",
                        "Eliminate standing water where mosquitoes breed",
                        "Install window screens",
                    ]),
                    ..KnowledgeEntry::default()
                },
            )
            .with_entry(
                "malaria",
                KnowledgeEntry {
                    definition: "Malaria is a serious parasitic disease transmitted through the bite of infected Anopheles mosquitoes.".to_string(),
                    symptoms: lines(&[
                        "High fever with chills and shivering",
                        "Headache and muscle pains",
                        "Fatigue",
                        "Nausea and vomiting",
                        "Diarrhea",
                        "Anemia and jaundice",
                        "Cyclic fever episodes every 48-72 hours",
                    ]),
                    treatment: lines(&[
                        "Antimalarial medications (chloroquine, artemisinin-based therapy)",
                        "Early diagnosis and treatment are critical",
                        "Hospital care for severe cases",
                        "Supportive care for symptoms",
                    ]),
                    prevention: lines(&[
                        "Antimalarial prophylaxis when traveling to endemic areas",
                        "Mosquito bite prevention",
                        "Sleep under insecticide-treated nets",
                        "Indoor residual spraying",
                    ]),
                    ..KnowledgeEntry::default()
                },
            )
            .with_entry(
                "typhoid",
                KnowledgeEntry {
                    definition: "Typhoid fever is a bacterial infection caused by Salmonella typhi, spread through contaminated food or water.".to_string(),
                    symptoms: lines(&[
                        "Sustained high fever",
                        "Headache and weakness",
                        "Stomach pain",
                        "Loss of appetite",
                        "Rose-colored spots on chest",
                        "Diarrhea or constipation",
                    ]),
                    treatment: lines(&[
                        "Antibiotics (ceftriaxone, azithromycin)",
                        "Adequate hydration",
                        "Proper nutrition",
                        "Hospitalization for severe cases",
                        "Complete the full course of antibiotics",
                    ]),
                    prevention: lines(&[
                        "Vaccination for travelers to endemic areas",
                        "Drink boiled or bottled water",
                        "Eat well-cooked food",
                        "Practice good hand hygiene",
                        "Avoid raw fruits and vegetables unless peeled",
                    ]),
                    ..KnowledgeEntry::default()
                },
            )
            .with_entry(
                "covid",
                KnowledgeEntry {
                    definition: "COVID-19 is a respiratory illness caused by the SARS-CoV-2 virus, first identified in 2019.".to_string(),
                    symptoms: lines(&[
                        "Fever or chills",
                        "Cough",
                        "Shortness of breath",
                        "Fatigue",
                        "Muscle or body aches",
                        "Loss of taste or smell",
                        "Sore throat",
                        "Congestion or runny nose",
                    ]),
                    treatment: lines(&[
                        "Rest and hydration",
                        "Fever reducers and pain relievers",
                        "Monitor oxygen saturation with pulse oximeter",
                        "Antiviral medications for high-risk patients",
                        "Hospital care for severe breathing difficulties",
                    ]),
                    prevention: lines(&[
                        "Vaccination and boosters",
                        "Mask-wearing in crowded places",
                        "Hand hygiene",
                        "Physical distancing",
                        "Good ventilation in indoor spaces",
                    ]),
                    ..KnowledgeEntry::default()
                },
            )
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
