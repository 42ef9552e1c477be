use std::sync::Arc;

use crate::browser::{BrowserLauncher, Locator};
use crate::config::AutomationConfig;
use crate::workflows::domain::{ApplicationOutcome, ExperienceLevel, JobPosting, SiteKind};
use crate::workflows::profile::CandidateProfile;

use super::cards::{scrape_listings, CardLayout};
use super::flow::ApplyFlow;
use super::SiteAdapter;

const SEARCH_REGION: &str = "India";
const POSTED_WITHIN_WEEK: &str = "r604800";

const CARDS: CardLayout = CardLayout {
    card: ".job-search-card",
    title: ".base-search-card__title",
    company: ".base-search-card__subtitle",
    location: ".job-search-card__location",
    link: "a",
    posted: ".job-search-card__listdate",
    experience: None,
    origin: "https://www.linkedin.com",
};

const FLOW: ApplyFlow = ApplyFlow {
    site: SiteKind::LinkedIn,
    status_indicator: Locator::Css(".artdeco-inline-feedback--success"),
    entry_controls: &[Locator::Css("button[aria-label*=\"Easy Apply\"]")],
    entry_settle_units: 2,
    unavailable_message: "Easy Apply not available for this position",
    phone_field: Some(Locator::Css("input[name=\"phoneNumber\"]")),
    message_fields: &[Locator::Css("textarea[name=\"message\"]")],
    advance_controls: &[
        Locator::Css("button[aria-label=\"Continue to next step\"]"),
        Locator::ButtonText("Next"),
        Locator::Css("button[type=\"submit\"]"),
    ],
    cover_letter,
};

/// LinkedIn job search and Easy Apply.
pub struct LinkedInAdapter {
    launcher: Arc<dyn BrowserLauncher>,
    automation: AutomationConfig,
}

impl LinkedInAdapter {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, automation: AutomationConfig) -> Self {
        Self {
            launcher,
            automation,
        }
    }

    pub fn search_url(title: &str, level: ExperienceLevel) -> String {
        let experience_filter = match level {
            ExperienceLevel::Entry => "1",
            ExperienceLevel::Mid => "2,3",
            ExperienceLevel::Senior => "4,5,6",
        };
        format!(
            "https://www.linkedin.com/jobs/search/?keywords={}&location={SEARCH_REGION}&f_TPR={POSTED_WITHIN_WEEK}&f_E={experience_filter}",
            urlencoding::encode(title)
        )
    }
}

impl SiteAdapter for LinkedInAdapter {
    fn kind(&self) -> SiteKind {
        SiteKind::LinkedIn
    }

    fn search(&self, title: &str, level: ExperienceLevel) -> Vec<JobPosting> {
        scrape_listings(
            self.launcher.as_ref(),
            &self.automation,
            SiteKind::LinkedIn,
            &Self::search_url(title, level),
            &CARDS,
        )
    }

    fn apply(&self, job_url: &str, profile: &CandidateProfile) -> ApplicationOutcome {
        FLOW.execute(self.launcher.as_ref(), &self.automation, job_url, profile)
    }
}

fn cover_letter(profile: &CandidateProfile) -> String {
    let skills: Vec<&str> = profile.skills.iter().take(5).map(String::as_str).collect();
    format!(
        "Dear Hiring Manager,\n\n{summary}\n\nKey Skills: {skills}\n\nI am excited about this opportunity and would love to contribute to your team.\n\nBest regards,\n{name}",
        summary = profile.summary,
        skills = skills.join(", "),
        name = profile.personal_info.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_title_and_level() {
        assert_eq!(
            LinkedInAdapter::search_url("Rust Engineer", ExperienceLevel::Mid),
            "https://www.linkedin.com/jobs/search/?keywords=Rust%20Engineer&location=India&f_TPR=r604800&f_E=2,3"
        );
        assert!(LinkedInAdapter::search_url("QA", ExperienceLevel::Entry).ends_with("f_E=1"));
        assert!(LinkedInAdapter::search_url("QA", ExperienceLevel::Senior).ends_with("f_E=4,5,6"));
    }

    #[test]
    fn cover_letter_lists_first_five_skills() {
        let profile = CandidateProfile::fallback();
        let letter = cover_letter(&profile);
        assert!(letter.starts_with("Dear Hiring Manager,\n\n"));
        assert!(letter.contains("Key Skills: JavaScript, TypeScript, React, Node.js, MongoDB\n"));
        assert!(!letter.contains("PostgreSQL"));
        assert!(letter.ends_with("Best regards,\nJohn Developer"));
    }
}
