//! Job discovery and application workflows.

pub mod apply;
pub mod domain;
pub mod profile;
pub mod router;
pub mod search;
pub mod service;
pub mod sites;

#[cfg(test)]
mod tests;

pub use apply::{ApplicationRunner, BatchSummary, OutcomeLog};
pub use domain::{ApplicationOutcome, ApplicationStatus, ExperienceLevel, JobPosting, SiteKind};
pub use profile::{CandidateProfile, ProfileExtractor, ResumeParser};
pub use router::job_router;
pub use search::{JobSearchAggregator, SearchResponse};
pub use service::JobAutomationService;
pub use sites::{default_adapters, SiteAdapter};
