use std::sync::Arc;

use crate::browser::{BrowserLauncher, Locator};
use crate::config::AutomationConfig;
use crate::workflows::domain::{ApplicationOutcome, ExperienceLevel, JobPosting, SiteKind};
use crate::workflows::profile::CandidateProfile;

use super::cards::{scrape_listings, CardLayout};
use super::flow::ApplyFlow;
use super::SiteAdapter;

const CARDS: CardLayout = CardLayout {
    card: ".jobTuple",
    title: ".title",
    company: ".companyInfo .subTitle",
    location: ".locationsContainer .location",
    link: ".title a",
    posted: ".jobTupleFooter .fleft",
    experience: Some(".expwdth"),
    origin: "https://www.naukri.com",
};

const FLOW: ApplyFlow = ApplyFlow {
    site: SiteKind::Naukri,
    status_indicator: Locator::Css(".success, .applied, .application-success"),
    entry_controls: &[
        Locator::Css("button.apply"),
        Locator::Css("a.apply"),
        Locator::ButtonText("Apply"),
    ],
    entry_settle_units: 3,
    unavailable_message: "Apply not available for this job posting",
    phone_field: None,
    message_fields: &[
        Locator::Css("textarea[name=\"coverLetter\"]"),
        Locator::Css("textarea[placeholder*=\"cover letter\"]"),
    ],
    advance_controls: &[
        Locator::Css("button[type=\"submit\"]"),
        Locator::ButtonText("Submit"),
        Locator::Css("input[type=\"submit\"]"),
    ],
    cover_letter,
};

/// Naukri job search and apply.
pub struct NaukriAdapter {
    launcher: Arc<dyn BrowserLauncher>,
    automation: AutomationConfig,
}

impl NaukriAdapter {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, automation: AutomationConfig) -> Self {
        Self {
            launcher,
            automation,
        }
    }

    pub fn search_url(title: &str, level: ExperienceLevel) -> String {
        let years = match level {
            ExperienceLevel::Entry => "0-2",
            ExperienceLevel::Mid => "2-5",
            ExperienceLevel::Senior => "5-10",
        };
        format!(
            "https://www.naukri.com/jobs-in-india?k={}&experience={years}",
            urlencoding::encode(title)
        )
    }
}

impl SiteAdapter for NaukriAdapter {
    fn kind(&self) -> SiteKind {
        SiteKind::Naukri
    }

    fn search(&self, title: &str, level: ExperienceLevel) -> Vec<JobPosting> {
        scrape_listings(
            self.launcher.as_ref(),
            &self.automation,
            SiteKind::Naukri,
            &Self::search_url(title, level),
            &CARDS,
        )
    }

    fn apply(&self, job_url: &str, profile: &CandidateProfile) -> ApplicationOutcome {
        FLOW.execute(self.launcher.as_ref(), &self.automation, job_url, profile)
    }
}

fn cover_letter(profile: &CandidateProfile) -> String {
    let experience: Vec<String> = profile
        .experience
        .iter()
        .map(|entry| format!("- {} at {} ({})", entry.title, entry.company, entry.duration))
        .collect();
    let skills: Vec<&str> = profile.skills.iter().take(5).map(String::as_str).collect();

    format!(
        "Dear Hiring Manager,\n\n{summary}\n\nRelevant Experience:\n{experience}\n\nTechnical Skills: {skills}\n\nI am excited about this opportunity and look forward to hearing from you.\n\nBest regards,\n{name}",
        summary = profile.summary,
        experience = experience.join("\n"),
        skills = skills.join(", "),
        name = profile.personal_info.name,
    )
}
