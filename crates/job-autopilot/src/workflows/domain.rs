use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Seniority bucket understood by every job site's search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

/// Job sites with a modeled search and application flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteKind {
    LinkedIn,
    Naukri,
}

impl SiteKind {
    pub const ALL: [SiteKind; 2] = [SiteKind::LinkedIn, SiteKind::Naukri];

    pub fn domain(&self) -> &'static str {
        match self {
            SiteKind::LinkedIn => "linkedin.com",
            SiteKind::Naukri => "naukri.com",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SiteKind::LinkedIn => "LinkedIn",
            SiteKind::Naukri => "Naukri",
        }
    }

    /// Resolves the site owning a job URL by host, accepting sub-domains such as `www.`.
    pub fn from_url(job_url: &str) -> Option<SiteKind> {
        let parsed = Url::parse(job_url.trim()).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        SiteKind::ALL.into_iter().find(|site| {
            let domain = site.domain();
            host == domain || host.ends_with(&format!(".{domain}"))
        })
    }
}

impl std::fmt::Display for SiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One listing scraped from a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: SiteKind,
    pub url: String,
    pub posted_date: String,
    pub experience: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Failed,
    AlreadyApplied,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Failed => "failed",
            ApplicationStatus::AlreadyApplied => "already_applied",
        }
    }
}

/// Terminal result of a single application attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOutcome {
    pub job_url: String,
    pub status: ApplicationStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApplicationOutcome {
    pub fn new(job_url: &str, status: ApplicationStatus, message: impl Into<String>) -> Self {
        Self {
            job_url: job_url.to_string(),
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn failed(job_url: &str, message: impl Into<String>) -> Self {
        Self::new(job_url, ApplicationStatus::Failed, message)
    }
}
