use crate::demo::{run_chat, run_demo, run_triage, ChatArgs, DemoArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ftis::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fever Triage Intelligence System",
    about = "Run the fever triage service or try its assessments from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess one patient from flags or an intake-form preset
    Triage(TriageArgs),
    /// Talk to the medical assistant in the terminal
    Chat(ChatArgs),
    /// Seed sample cases and print a clinician dashboard summary
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Triage(args) => run_triage(args),
        Command::Chat(args) => run_chat(args),
        Command::Demo(args) => run_demo(args),
    }
}
