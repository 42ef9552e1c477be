//! Resume text to candidate profile extraction.

pub mod domain;
mod extractor;
mod fallback;
mod source;

pub use domain::{CandidateProfile, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry};
pub use extractor::{ProfileExtractor, SKILL_VOCABULARY};
pub use source::{FileTextSource, ResumeParser, ResumeSourceError, ResumeTextSource};
