//! Site adapters: one search and apply implementation per supported job board.

mod cards;
mod flow;
mod linkedin;
mod naukri;

use std::sync::Arc;

use crate::browser::BrowserLauncher;
use crate::config::AutomationConfig;

use super::domain::{ApplicationOutcome, ExperienceLevel, JobPosting, SiteKind};
use super::profile::CandidateProfile;

pub use cards::MAX_RESULTS_PER_SITE;
pub use flow::{FlowState, MAX_FORM_STEPS};
pub use linkedin::LinkedInAdapter;
pub use naukri::NaukriAdapter;

/// Search and apply capability for one job site.
///
/// Both operations are blocking and never fail: search faults collapse to an empty list and
/// apply faults to a `failed` outcome.
pub trait SiteAdapter: Send + Sync {
    fn kind(&self) -> SiteKind;
    fn search(&self, title: &str, level: ExperienceLevel) -> Vec<JobPosting>;
    fn apply(&self, job_url: &str, profile: &CandidateProfile) -> ApplicationOutcome;
}

/// Adapters for every supported site, LinkedIn first.
pub fn default_adapters(
    launcher: Arc<dyn BrowserLauncher>,
    automation: AutomationConfig,
) -> Vec<Arc<dyn SiteAdapter>> {
    let linked_in: Arc<dyn SiteAdapter> =
        Arc::new(LinkedInAdapter::new(launcher.clone(), automation.clone()));
    let naukri: Arc<dyn SiteAdapter> = Arc::new(NaukriAdapter::new(launcher, automation));
    vec![linked_in, naukri]
}
