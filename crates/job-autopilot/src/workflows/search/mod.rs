//! Concurrent fan-out of one search across every site adapter.

mod recency;

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::domain::{ExperienceLevel, JobPosting};
use super::sites::{SiteAdapter, MAX_RESULTS_PER_SITE};

pub use recency::is_recent;

pub const DEFAULT_SEARCH_TITLE: &str = "Software Developer";

/// Recent postings from every site, grouped by site in adapter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub jobs: Vec<JobPosting>,
    pub total_count: usize,
}

impl SearchResponse {
    fn from_jobs(jobs: Vec<JobPosting>) -> Self {
        Self {
            total_count: jobs.len(),
            jobs,
        }
    }
}

#[derive(Clone)]
pub struct JobSearchAggregator {
    adapters: Vec<Arc<dyn SiteAdapter>>,
}

impl JobSearchAggregator {
    pub fn new(adapters: Vec<Arc<dyn SiteAdapter>>) -> Self {
        Self { adapters }
    }

    /// Runs every adapter concurrently and waits for all of them.
    pub async fn search(&self, title: &str, level: ExperienceLevel) -> SearchResponse {
        info!(
            title,
            level = level.label(),
            sites = self.adapters.len(),
            "starting job search"
        );

        let searches = self.adapters.iter().cloned().map(|adapter| {
            let title = title.to_string();
            async move {
                let site = adapter.kind();
                match tokio::task::spawn_blocking(move || adapter.search(&title, level)).await {
                    Ok(jobs) => jobs,
                    Err(err) => {
                        error!(site = %site, error = %err, "search worker aborted");
                        Vec::new()
                    }
                }
            }
        });

        let per_site = join_all(searches).await;
        let found: usize = per_site.iter().map(Vec::len).sum();

        let jobs: Vec<JobPosting> = per_site
            .into_iter()
            .flat_map(|mut jobs| {
                jobs.truncate(MAX_RESULTS_PER_SITE);
                jobs
            })
            .filter(|job| is_recent(&job.posted_date))
            .collect();

        info!(found, job_count = jobs.len(), "job search aggregated");
        SearchResponse::from_jobs(jobs)
    }
}

impl std::fmt::Debug for JobSearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sites: Vec<_> = self.adapters.iter().map(|adapter| adapter.kind()).collect();
        f.debug_struct("JobSearchAggregator")
            .field("sites", &sites)
            .finish()
    }
}
