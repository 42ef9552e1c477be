use crate::commands::{
    run_apply, run_pipeline, run_resume_parse, run_search, ApplyArgs, PipelineArgs,
    ResumeParseArgs, SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_autopilot::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Autopilot",
    about = "Search job boards and submit applications from a parsed resume",
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
    /// Search every supported job board for recent postings
    Search(SearchArgs),
    /// Apply to a single job posting
    Apply(ApplyArgs),
    /// Resume utilities
    Resume {
        #[command(subcommand)]
        command: ResumeCommand,
    },
    /// Parse a resume, search, and apply to the most recent postings
    Run(PipelineArgs),
}

#[derive(Subcommand, Debug)]
enum ResumeCommand {
    /// Extract a candidate profile from a resume file
    Parse(ResumeParseArgs),
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
        Command::Search(args) => run_search(args).await,
        Command::Apply(args) => run_apply(args).await,
        Command::Resume {
            command: ResumeCommand::Parse(args),
        } => run_resume_parse(args).await,
        Command::Run(args) => run_pipeline(args).await,
    }
}
