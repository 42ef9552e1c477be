//! Dispatches job URLs to the owning site adapter and collects outcomes.

mod ledger;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::domain::{ApplicationOutcome, ApplicationStatus, SiteKind};
use super::profile::CandidateProfile;
use super::sites::SiteAdapter;

pub use ledger::{OutcomeLog, OutcomeLogError, OUTCOME_LOG_HEADERS};

pub const UNSUPPORTED_SITE_MESSAGE: &str =
    "Unsupported job site. Only LinkedIn and Naukri are supported.";

#[derive(Clone)]
pub struct ApplicationRunner {
    adapters: Vec<Arc<dyn SiteAdapter>>,
}

impl ApplicationRunner {
    pub fn new(adapters: Vec<Arc<dyn SiteAdapter>>) -> Self {
        Self { adapters }
    }

    fn adapter_for(&self, job_url: &str) -> Option<Arc<dyn SiteAdapter>> {
        let site = SiteKind::from_url(job_url)?;
        self.adapters
            .iter()
            .find(|adapter| adapter.kind() == site)
            .cloned()
    }

    fn unsupported(job_url: &str) -> ApplicationOutcome {
        warn!(job_url, "no adapter for job url");
        ApplicationOutcome::failed(job_url, UNSUPPORTED_SITE_MESSAGE)
    }

    /// Blocking attempt on the calling thread.
    pub fn apply(&self, job_url: &str, profile: &CandidateProfile) -> ApplicationOutcome {
        match self.adapter_for(job_url) {
            Some(adapter) => adapter.apply(job_url, profile),
            None => Self::unsupported(job_url),
        }
    }

    /// Runs the attempt on the blocking pool; a panicking worker is reported as `failed`.
    pub async fn apply_detached(
        &self,
        job_url: String,
        profile: Arc<CandidateProfile>,
    ) -> ApplicationOutcome {
        let Some(adapter) = self.adapter_for(&job_url) else {
            return Self::unsupported(&job_url);
        };

        let url = job_url.clone();
        match tokio::task::spawn_blocking(move || adapter.apply(&url, &profile)).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(job_url = %job_url, error = %err, "application worker aborted");
                ApplicationOutcome::failed(&job_url, format!("Application failed: {err}"))
            }
        }
    }

    /// Applies to every URL with at most `concurrency` attempts in flight, keeping input order.
    pub async fn apply_batch(
        &self,
        job_urls: Vec<String>,
        profile: Arc<CandidateProfile>,
        concurrency: usize,
    ) -> BatchSummary {
        info!(jobs = job_urls.len(), concurrency, "starting application batch");
        let outcomes: Vec<ApplicationOutcome> = stream::iter(job_urls)
            .map(|job_url| self.apply_detached(job_url, profile.clone()))
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let summary = BatchSummary::from_outcomes(outcomes);
        info!(
            applied = summary.applied,
            failed = summary.failed,
            already_applied = summary.already_applied,
            "application batch finished"
        );
        summary
    }
}

impl std::fmt::Debug for ApplicationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sites: Vec<_> = self.adapters.iter().map(|adapter| adapter.kind()).collect();
        f.debug_struct("ApplicationRunner")
            .field("sites", &sites)
            .finish()
    }
}

/// Outcomes of a batch with per-status tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub outcomes: Vec<ApplicationOutcome>,
    pub applied: usize,
    pub failed: usize,
    pub already_applied: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: Vec<ApplicationOutcome>) -> Self {
        let count = |status: ApplicationStatus| {
            outcomes
                .iter()
                .filter(|outcome| outcome.status == status)
                .count()
        };
        Self {
            applied: count(ApplicationStatus::Applied),
            failed: count(ApplicationStatus::Failed),
            already_applied: count(ApplicationStatus::AlreadyApplied),
            outcomes,
        }
    }
}
