use crate::infra::{chrome_service, parse_level};
use chrono::Local;
use clap::Args;
use job_autopilot::config::AppConfig;
use job_autopilot::error::AppError;
use job_autopilot::telemetry;
use job_autopilot::workflows::apply::OutcomeLog;
use job_autopilot::workflows::search::DEFAULT_SEARCH_TITLE;
use job_autopilot::workflows::{
    ApplicationOutcome, CandidateProfile, ExperienceLevel, JobAutomationService, JobPosting,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Job title keywords
    #[arg(long, default_value = DEFAULT_SEARCH_TITLE)]
    pub(crate) title: String,
    /// Experience level: entry, mid, or senior
    #[arg(long, default_value = "mid", value_parser = parse_level)]
    pub(crate) experience: ExperienceLevel,
    /// Print the raw JSON response instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// LinkedIn or Naukri job posting URL
    #[arg(long)]
    pub(crate) job_url: String,
    /// Resume file used to fill the form (defaults to APP_RESUME_PATH)
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ResumeParseArgs {
    /// Resume file to parse (defaults to APP_RESUME_PATH)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PipelineArgs {
    /// Job title keywords
    #[arg(long, default_value = DEFAULT_SEARCH_TITLE)]
    pub(crate) title: String,
    /// Experience level: entry, mid, or senior
    #[arg(long, default_value = "mid", value_parser = parse_level)]
    pub(crate) experience: ExperienceLevel,
    /// Resume file used to fill forms (defaults to APP_RESUME_PATH)
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Maximum number of postings to apply to
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Append outcomes to this CSV ledger
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    /// Search and list targets without applying
    #[arg(long)]
    pub(crate) dry_run: bool,
}

fn prepare() -> Result<JobAutomationService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(chrome_service(&config))
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let response = service.search(&args.title, args.experience).await;

    if args.json {
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Recent '{}' postings ({} level): {}",
        args.title,
        args.experience.label(),
        response.total_count
    );
    for job in &response.jobs {
        render_posting(job);
    }
    Ok(())
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let profile = service.parse_resume(args.resume).await?;
    let outcome = service.apply(args.job_url, profile).await;
    render_outcome(&outcome);
    Ok(())
}

pub(crate) async fn run_resume_parse(args: ResumeParseArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let profile = service.parse_resume(args.path).await?;
    render_profile(&profile);
    Ok(())
}

pub(crate) async fn run_pipeline(args: PipelineArgs) -> Result<(), AppError> {
    let PipelineArgs {
        title,
        experience,
        resume,
        limit,
        log,
        dry_run,
    } = args;

    let service = prepare()?;

    println!("Job application pipeline");
    let profile = service.parse_resume(resume).await?;
    render_profile(&profile);

    let response = service.search(&title, experience).await;
    let targets: Vec<JobPosting> = response.jobs.into_iter().take(limit).collect();
    println!(
        "\nTargets ({} of {} recent postings)",
        targets.len(),
        response.total_count
    );
    for job in &targets {
        render_posting(job);
    }

    if dry_run {
        println!("\nDry run: no applications submitted");
        return Ok(());
    }

    let urls = targets.iter().map(|job| job.url.clone()).collect();
    let summary = service.apply_batch(urls, profile).await;

    println!(
        "\nApplications: {} applied | {} already applied | {} failed",
        summary.applied, summary.already_applied, summary.failed
    );
    for outcome in &summary.outcomes {
        render_outcome(outcome);
    }

    if let Some(path) = log {
        let ledger = OutcomeLog::new(path);
        let rows = ledger.append(
            summary
                .outcomes
                .iter()
                .zip(targets.iter())
                .map(|(outcome, job)| (outcome, Some(job))),
        )?;
        println!("\n{} outcomes appended to {}", rows, ledger.path().display());
    }

    Ok(())
}

fn render_profile(profile: &CandidateProfile) {
    let info = &profile.personal_info;
    println!("Candidate: {} <{}> {}", info.name, info.email, info.phone);
    println!("  Skills: {}", profile.skills.join(", "));
    for entry in &profile.experience {
        println!("  - {} at {} ({})", entry.title, entry.company, entry.duration);
    }
    for entry in &profile.education {
        println!("  - {} ({}, {})", entry.degree, entry.institution, entry.year);
    }
}

fn render_posting(job: &JobPosting) {
    println!(
        "- [{}] {} at {} | {} | {}",
        job.source, job.title, job.company, job.location, job.posted_date
    );
    println!("  {}", job.url);
}

fn render_outcome(outcome: &ApplicationOutcome) {
    println!(
        "- {} {} -> {}: {}",
        outcome.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        outcome.job_url,
        outcome.status.label(),
        outcome.message
    );
}
