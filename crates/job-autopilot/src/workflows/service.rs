use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::browser::BrowserLauncher;
use crate::config::{AppConfig, AutomationConfig};

use super::apply::{ApplicationRunner, BatchSummary};
use super::domain::{ApplicationOutcome, ExperienceLevel};
use super::profile::{CandidateProfile, ResumeParser, ResumeSourceError};
use super::search::{JobSearchAggregator, SearchResponse};
use super::sites::{default_adapters, SiteAdapter};

/// Service composing resume parsing, job search, and application attempts.
pub struct JobAutomationService {
    aggregator: JobSearchAggregator,
    runner: ApplicationRunner,
    resume_parser: Arc<ResumeParser>,
    default_resume: PathBuf,
    apply_concurrency: usize,
}

impl JobAutomationService {
    pub fn new(
        adapters: Vec<Arc<dyn SiteAdapter>>,
        resume_parser: ResumeParser,
        default_resume: PathBuf,
        apply_concurrency: usize,
    ) -> Self {
        Self {
            aggregator: JobSearchAggregator::new(adapters.clone()),
            runner: ApplicationRunner::new(adapters),
            resume_parser: Arc::new(resume_parser),
            default_resume,
            apply_concurrency: apply_concurrency.max(1),
        }
    }

    /// Wires the default adapters over `launcher` using the loaded configuration.
    pub fn from_config(launcher: Arc<dyn BrowserLauncher>, config: &AppConfig) -> Self {
        let automation: &AutomationConfig = &config.automation;
        Self::new(
            default_adapters(launcher, automation.clone()),
            ResumeParser::default(),
            config.resume.default_path.clone(),
            automation.apply_concurrency,
        )
    }

    pub async fn search(&self, title: &str, level: ExperienceLevel) -> SearchResponse {
        self.aggregator.search(title, level).await
    }

    pub async fn apply(&self, job_url: String, profile: CandidateProfile) -> ApplicationOutcome {
        self.runner.apply_detached(job_url, Arc::new(profile)).await
    }

    pub async fn apply_batch(
        &self,
        job_urls: Vec<String>,
        profile: CandidateProfile,
    ) -> BatchSummary {
        self.runner
            .apply_batch(job_urls, Arc::new(profile), self.apply_concurrency)
            .await
    }

    /// Parses `path`, or the configured default resume when none is given.
    pub async fn parse_resume(
        &self,
        path: Option<PathBuf>,
    ) -> Result<CandidateProfile, ResumeSourceError> {
        let path = path.unwrap_or_else(|| self.default_resume.clone());
        info!(path = %path.display(), "parsing resume");

        let parser = self.resume_parser.clone();
        tokio::task::spawn_blocking(move || parser.parse(&path))
            .await
            .map_err(|err| ResumeSourceError::Aborted(err.to_string()))?
    }
}
