use crate::infra::InMemoryCaseRepository;
use chrono::Utc;
use clap::{Args, ValueEnum};
use ftis::cases::{seed_cases, CaseIntake, CaseService, CaseStats};
use ftis::chat::{suggestions, ChatResponder, ChatSession, KnowledgeBase};
use ftis::error::AppError;
use ftis::triage::{score_breakdown, PatientObservation, TriageEngine, TriageResult};
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Sample patients offered by the intake form's demo buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    Mild,
    Moderate,
    Critical,
}

impl Preset {
    const ALL: [Preset; 3] = [Preset::Mild, Preset::Moderate, Preset::Critical];

    pub(crate) fn observation(self) -> PatientObservation {
        match self {
            Preset::Mild => PatientObservation {
                headache: true,
                body_pain: true,
                platelet_count: Some(280),
                ..PatientObservation::new(37.8, 2)
            },
            Preset::Moderate => PatientObservation {
                headache: true,
                body_pain: true,
                rash: true,
                nausea_vomiting: true,
                platelet_count: Some(120),
                mosquito_exposure: true,
                ..PatientObservation::new(39.2, 3)
            },
            Preset::Critical => PatientObservation {
                headache: true,
                body_pain: true,
                nausea_vomiting: true,
                breathing_difficulty: true,
                platelet_count: Some(80),
                travel_history: true,
                mosquito_exposure: true,
                ..PatientObservation::new(40.5, 5)
            },
        }
    }

    fn name(self) -> &'static str {
        match self {
            Preset::Mild => "mild",
            Preset::Moderate => "moderate",
            Preset::Critical => "critical",
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct TriageArgs {
    /// Start from an intake-form demo patient; explicit flags override it
    #[arg(long, value_enum)]
    pub(crate) preset: Option<Preset>,
    /// Body temperature in °C
    #[arg(long, required_unless_present = "preset")]
    pub(crate) temperature: Option<f64>,
    /// Days since fever onset
    #[arg(long, required_unless_present = "preset")]
    pub(crate) duration_days: Option<u32>,
    #[arg(long)]
    pub(crate) headache: bool,
    #[arg(long)]
    pub(crate) body_pain: bool,
    #[arg(long)]
    pub(crate) rash: bool,
    #[arg(long)]
    pub(crate) nausea_vomiting: bool,
    #[arg(long)]
    pub(crate) breathing_difficulty: bool,
    /// Platelet count in thousands per µL
    #[arg(long)]
    pub(crate) platelet_count: Option<u32>,
    #[arg(long)]
    pub(crate) travel_history: bool,
    #[arg(long)]
    pub(crate) mosquito_exposure: bool,
    /// Print the assessment as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl TriageArgs {
    pub(crate) fn observation(&self) -> PatientObservation {
        let base = self
            .preset
            .map(Preset::observation)
            .unwrap_or_else(|| PatientObservation::new(0.0, 0));

        PatientObservation {
            temperature: self.temperature.unwrap_or(base.temperature),
            duration_days: self.duration_days.unwrap_or(base.duration_days),
            headache: base.headache || self.headache,
            body_pain: base.body_pain || self.body_pain,
            rash: base.rash || self.rash,
            nausea_vomiting: base.nausea_vomiting || self.nausea_vomiting,
            breathing_difficulty: base.breathing_difficulty || self.breathing_difficulty,
            platelet_count: self.platelet_count.or(base.platelet_count),
            travel_history: base.travel_history || self.travel_history,
            mosquito_exposure: base.mosquito_exposure || self.mosquito_exposure,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ChatArgs {
    /// Seed for the greeting and fallback variants, for reproducible sessions
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of sample cases to seed
    #[arg(long, default_value_t = 20)]
    pub(crate) cases: usize,
    /// Seed for the sample case generator
    #[arg(long, default_value_t = 42)]
    pub(crate) seed: u64,
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let observation = args.observation();
    let result = TriageEngine::new().assess(&observation, Utc::now());

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Assessment payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_assessment(&observation, &result);
    Ok(())
}

pub(crate) fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let knowledge = KnowledgeBase::standard();
    let responder = match args.seed {
        Some(seed) => ChatResponder::seeded(knowledge, seed),
        None => ChatResponder::new(knowledge),
    };
    let mut session = ChatSession::new(responder);

    let stdin = io::stdin();
    let stdout = io::stdout();
    chat_loop(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Reads one message per line until EOF or `/quit`.
pub(crate) fn chat_loop<R, I, W>(
    session: &mut ChatSession<R>,
    input: I,
    mut output: W,
) -> io::Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(output, "FTIS medical assistant. Type /quit to leave.")?;
    writeln!(output, "Try asking:")?;
    for suggestion in suggestions() {
        writeln!(output, "  - {suggestion}")?;
    }

    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        if line.trim() == "/quit" {
            break;
        }
        if let Some(turn) = session.send(&line) {
            writeln!(output, "\n{}\n", turn.content)?;
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Fever triage demo");
    let engine = TriageEngine::new();
    for preset in Preset::ALL {
        let observation = preset.observation();
        let result = engine.assess(&observation, Utc::now());
        println!("\nPreset '{}'", preset.name());
        render_assessment(&observation, &result);
    }

    let repository = Arc::new(InMemoryCaseRepository::default());
    let service = CaseService::new(repository);
    let intake = CaseIntake::anonymous(Preset::Critical.observation());
    let submitted = service.submit(intake)?;
    println!(
        "\nStored walk-in case {} as #{} ({})",
        submitted.result.case_id,
        submitted.db_id,
        submitted.result.level.label()
    );

    let seeded = seed_cases(&service, args.cases, args.seed, Utc::now())?;
    println!("Seeded {} sample cases (seed {})", seeded.len(), args.seed);

    let stats = service.stats()?;
    render_dashboard(&stats);
    Ok(())
}

fn render_assessment(observation: &PatientObservation, result: &TriageResult) {
    let breakdown = score_breakdown(observation);
    println!(
        "- Triage score {} -> {} ({})",
        result.score,
        result.level.label(),
        result.color.label()
    );
    println!("  Score components:");
    for component in &breakdown.components {
        println!(
            "    - {:?}: +{} ({})",
            component.factor, component.points, component.notes
        );
    }
    if breakdown.raw_total != u16::from(result.score) {
        println!("    raw total {} clamped", breakdown.raw_total);
    }

    println!("  Likely conditions:");
    for diagnosis in &result.diagnoses {
        println!(
            "    - {}: {:.1}%",
            diagnosis.label,
            diagnosis.probability * 100.0
        );
    }
    println!("  Key factors:");
    for explanation in &result.explanations {
        println!(
            "    - {}: {:.3}",
            explanation.feature.label(),
            explanation.impact
        );
    }
    println!("  Recommendation: {}", result.recommendation);
    if let Some(tests) = &result.suggested_tests {
        println!("  Suggested tests: {tests}");
    }
}

fn render_dashboard(stats: &CaseStats) {
    println!("\nClinician dashboard");
    println!(
        "- {} cases | {} pending | {} high or critical",
        stats.total_cases, stats.pending_cases, stats.critical_cases
    );
    println!("Status breakdown:");
    for (status, count) in &stats.status_breakdown {
        println!("  - {status}: {count}");
    }
    println!("Triage breakdown:");
    for (level, count) in &stats.triage_breakdown {
        println!("  - {level}: {count}");
    }
    println!("Most recent cases:");
    for record in &stats.recent_cases {
        let diagnosis = record
            .top_diagnosis
            .map(|condition| condition.label())
            .unwrap_or("undetermined");
        println!(
            "  - #{} {} | {} ({}) | {} | {}",
            record.id,
            record.patient_name,
            record.triage_level.label(),
            record.triage_score,
            diagnosis,
            record.status
        );
    }
}
