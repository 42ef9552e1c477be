use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::workflows::domain::{ApplicationOutcome, JobPosting, SiteKind};

pub const OUTCOME_LOG_HEADERS: [&str; 8] = [
    "Job Title",
    "Company",
    "Location",
    "Source",
    "Job URL",
    "Status",
    "Applied At",
    "Notes",
];

#[derive(Debug, thiserror::Error)]
pub enum OutcomeLogError {
    #[error("failed to open outcome log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write outcome log: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    #[serde(rename = "Job Title")]
    job_title: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Job URL")]
    job_url: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Applied At")]
    applied_at: String,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> OutcomeRow<'a> {
    fn new(outcome: &'a ApplicationOutcome, posting: Option<&'a JobPosting>) -> Self {
        let source = posting
            .map(|posting| posting.source)
            .or_else(|| SiteKind::from_url(&outcome.job_url))
            .map(|site| site.label())
            .unwrap_or_default();

        Self {
            job_title: posting.map(|posting| posting.title.as_str()).unwrap_or_default(),
            company: posting.map(|posting| posting.company.as_str()).unwrap_or_default(),
            location: posting.map(|posting| posting.location.as_str()).unwrap_or_default(),
            source,
            job_url: &outcome.job_url,
            status: outcome.status.label(),
            applied_at: outcome.timestamp.to_rfc3339(),
            notes: &outcome.message,
        }
    }
}

/// Append-only CSV ledger of application outcomes.
#[derive(Debug, Clone)]
pub struct OutcomeLog {
    path: PathBuf,
}

impl OutcomeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row per outcome, writing the header row only into an empty file.
    pub fn append<'a, I>(&self, rows: I) -> Result<usize, OutcomeLogError>
    where
        I: IntoIterator<Item = (&'a ApplicationOutcome, Option<&'a JobPosting>)>,
    {
        let io_error = |source| OutcomeLogError::Io {
            path: self.path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        let is_empty = file.metadata().map_err(io_error)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        let mut written = 0;
        for (outcome, posting) in rows {
            writer.serialize(OutcomeRow::new(outcome, posting))?;
            written += 1;
        }
        writer.flush().map_err(io_error)?;

        info!(path = %self.path.display(), rows = written, "outcomes logged");
        Ok(written)
    }
}
