use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::domain::{
    CandidateProfile, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
};

const MAX_EXPERIENCE_ENTRIES: usize = 3;
const MAX_EDUCATION_ENTRIES: usize = 2;
const PROJECT_TECHNOLOGY_LIMIT: usize = 5;

const DEFAULT_LOCATION: &str = "India";
const GENERIC_SUMMARY: &str =
    "Experienced software developer with expertise in modern web technologies";

const PLACEHOLDER_TITLE: &str = "Software Developer";
const PLACEHOLDER_DURATION: &str = "2+ years";
const PLACEHOLDER_ROLE_DESCRIPTION: &str = "Developed and maintained software applications";
const PLACEHOLDER_INSTITUTION: &str = "University";
const PLACEHOLDER_GRADUATION_YEAR: &str = "2020";
const PLACEHOLDER_PROJECT_NAME: &str = "Portfolio Website";
const PLACEHOLDER_PROJECT_DESCRIPTION: &str = "Personal portfolio showcasing development skills";

/// Technology names recognized as skills, in reporting order.
pub const SKILL_VOCABULARY: [&str; 37] = [
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "Laravel",
    "HTML",
    "CSS",
    "Sass",
    "Bootstrap",
    "Tailwind",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "Jenkins",
    "GraphQL",
    "REST API",
];

struct Patterns {
    email: Regex,
    phone: Regex,
    linked_in: Regex,
    github: Regex,
    skills_section: Regex,
    experience_section: Regex,
    company: Regex,
    education_section: Regex,
    degree: Regex,
    projects_heading: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern}: {err}"))
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        email: compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        phone: compile(r"(?:\+\d{1,3}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}"),
        linked_in: compile(r"(?i)linkedin\.com/in/[\w-]+"),
        github: compile(r"(?i)github\.com/[\w-]+"),
        skills_section: compile(
            r"(?i)(?:skills|technologies|technical skills|programming languages)[:\s]+([\s\S]*?)(?:\n\s*\n|$)",
        ),
        experience_section: compile(
            r"(?i)(?:experience|work experience|employment)[:\s]+([\s\S]*?)(?:education|skills|projects|$)",
        ),
        company: compile(
            r"[A-Z][a-zA-Z\s&]+(?:Inc\.|LLC|Ltd\.|Corp\.|Company|Technologies|Systems|Solutions)",
        ),
        education_section: compile(
            r"(?i)(?:education|academic background)[:\s]+([\s\S]*?)(?:experience|skills|projects|$)",
        ),
        degree: compile(r"(?i)(?:Bachelor|Master|PhD|B\.E\.|B\.Tech|M\.Tech|M\.S\.|B\.S\.)[^\n]*"),
        projects_heading: compile(r"(?i)(?:projects|personal projects|key projects)[:\s]+"),
    })
}

/// Best-effort heuristics turning resume text into a [`CandidateProfile`].
///
/// Extraction never fails: a field that cannot be located comes back empty. Several fields are
/// placeholders rather than parsed values (experience titles and durations, education
/// institutions and years, the project entry, the summary).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileExtractor;

impl ProfileExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, resume_text: &str) -> CandidateProfile {
        debug!(text_length = resume_text.len(), "extracting profile from resume text");

        let patterns = patterns();
        let skills = extract_skills(patterns, resume_text);
        let projects = if patterns.projects_heading.is_match(resume_text) {
            vec![ProjectEntry {
                name: PLACEHOLDER_PROJECT_NAME.to_string(),
                description: PLACEHOLDER_PROJECT_DESCRIPTION.to_string(),
                technologies: skills.iter().take(PROJECT_TECHNOLOGY_LIMIT).cloned().collect(),
            }]
        } else {
            Vec::new()
        };

        CandidateProfile {
            personal_info: PersonalInfo {
                name: first_line(resume_text),
                email: first_match(&patterns.email, resume_text).unwrap_or_default(),
                phone: first_match(&patterns.phone, resume_text).unwrap_or_default(),
                location: DEFAULT_LOCATION.to_string(),
                linked_in: first_match(&patterns.linked_in, resume_text),
                github: first_match(&patterns.github, resume_text),
            },
            summary: GENERIC_SUMMARY.to_string(),
            experience: extract_experience(patterns, resume_text),
            skills,
            education: extract_education(patterns, resume_text),
            projects,
        }
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|found| found.as_str().to_string())
}

fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn section<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|span| span.as_str())
}

// A vocabulary entry counts when it appears in the skills span or anywhere else in the resume.
fn extract_skills(patterns: &Patterns, text: &str) -> Vec<String> {
    let Some(span) = section(&patterns.skills_section, text) else {
        return Vec::new();
    };

    let span = span.to_lowercase();
    let full_text = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| {
            let needle = skill.to_lowercase();
            span.contains(&needle) || full_text.contains(&needle)
        })
        .map(|skill| skill.to_string())
        .collect()
}

fn extract_experience(patterns: &Patterns, text: &str) -> Vec<ExperienceEntry> {
    let Some(span) = section(&patterns.experience_section, text) else {
        return Vec::new();
    };

    patterns
        .company
        .find_iter(span)
        .take(MAX_EXPERIENCE_ENTRIES)
        .map(|company| ExperienceEntry {
            title: PLACEHOLDER_TITLE.to_string(),
            company: company.as_str().trim().to_string(),
            duration: PLACEHOLDER_DURATION.to_string(),
            description: PLACEHOLDER_ROLE_DESCRIPTION.to_string(),
        })
        .collect()
}

fn extract_education(patterns: &Patterns, text: &str) -> Vec<EducationEntry> {
    let Some(span) = section(&patterns.education_section, text) else {
        return Vec::new();
    };

    patterns
        .degree
        .find_iter(span)
        .take(MAX_EDUCATION_ENTRIES)
        .map(|degree| EducationEntry {
            degree: degree.as_str().trim().to_string(),
            institution: PLACEHOLDER_INSTITUTION.to_string(),
            year: PLACEHOLDER_GRADUATION_YEAR.to_string(),
        })
        .collect()
}
