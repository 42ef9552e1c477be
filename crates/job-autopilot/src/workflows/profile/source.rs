use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::domain::CandidateProfile;
use super::extractor::ProfileExtractor;

#[derive(Debug, thiserror::Error)]
pub enum ResumeSourceError {
    #[error("failed to read resume {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert PDF resume {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },
    #[error("resume parsing worker aborted: {0}")]
    Aborted(String),
}

/// Converts a resume file into plain text.
pub trait ResumeTextSource: Send + Sync {
    fn read_text(&self, path: &Path) -> Result<String, ResumeSourceError>;
}

/// Reads `.pdf` files through `pdf-extract` and anything else as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextSource;

impl ResumeTextSource for FileTextSource {
    fn read_text(&self, path: &Path) -> Result<String, ResumeSourceError> {
        let is_pdf = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            let bytes = std::fs::read(path).map_err(|source| ResumeSourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|err| ResumeSourceError::Pdf {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
        } else {
            std::fs::read_to_string(path).map_err(|source| ResumeSourceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Resolves a resume path into a profile, substituting the canned profile when the file is absent.
pub struct ResumeParser {
    source: Box<dyn ResumeTextSource>,
    extractor: ProfileExtractor,
}

impl ResumeParser {
    pub fn new(source: Box<dyn ResumeTextSource>) -> Self {
        Self {
            source,
            extractor: ProfileExtractor::new(),
        }
    }

    pub fn parse(&self, path: &Path) -> Result<CandidateProfile, ResumeSourceError> {
        if !path.exists() {
            warn!(path = %path.display(), "resume file not found, using default profile");
            return Ok(CandidateProfile::fallback());
        }

        let text = self.source.read_text(path)?;
        let profile = self.extractor.extract(&text);
        info!(
            path = %path.display(),
            name = %profile.personal_info.name,
            skills = profile.skills.len(),
            experience = profile.experience.len(),
            "resume parsed"
        );
        Ok(profile)
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(Box::new(FileTextSource))
    }
}

impl std::fmt::Debug for ResumeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeParser").finish_non_exhaustive()
    }
}
