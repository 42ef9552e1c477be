use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::browser::{js_string, BrowserError, BrowserLauncher, Locator};
use crate::config::AutomationConfig;
use crate::workflows::domain::{JobPosting, SiteKind};

/// Upper bound on postings taken from a single results page.
pub const MAX_RESULTS_PER_SITE: usize = 10;

/// Structural lookup for the result cards of one site.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CardLayout {
    pub card: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub link: &'static str,
    pub posted: &'static str,
    pub experience: Option<&'static str>,
    /// Origin relative links are resolved against.
    pub origin: &'static str,
}

impl CardLayout {
    /// Page script returning the visible cards as a JSON string.
    pub(crate) fn script(&self) -> String {
        let experience = self
            .experience
            .map(js_string)
            .unwrap_or_else(|| "null".to_string());

        format!(
            "JSON.stringify(Array.from(document.querySelectorAll({card})).slice(0, {limit}).map((card) => {{ \
             const text = (selector) => {{ if (!selector) {{ return ''; }} const node = card.querySelector(selector); return node ? node.textContent.trim() : ''; }}; \
             const link = card.querySelector({link}); \
             return {{ title: text({title}), company: text({company}), location: text({location}), \
             href: link ? (link.getAttribute('href') || '') : '', postedDate: text({posted}), experience: text({experience}) }}; \
             }}))",
            card = js_string(self.card),
            limit = MAX_RESULTS_PER_SITE,
            link = js_string(self.link),
            title = js_string(self.title),
            company = js_string(self.company),
            location = js_string(self.location),
            posted = js_string(self.posted),
            experience = experience,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCard {
    title: String,
    company: String,
    location: String,
    href: String,
    posted_date: String,
    experience: String,
}

impl RawCard {
    fn into_posting(self, source: SiteKind, origin: &str) -> JobPosting {
        JobPosting {
            url: resolve_link(origin, &self.href),
            title: self.title,
            company: self.company,
            location: self.location,
            source,
            posted_date: self.posted_date,
            experience: self.experience,
            description: String::new(),
        }
    }
}

pub(crate) fn resolve_link(origin: &str, href: &str) -> String {
    if href.trim().is_empty() {
        return String::new();
    }
    Url::parse(origin)
        .and_then(|base| base.join(href.trim()))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

/// Runs one search page and converts every failure into an empty result.
pub(crate) fn scrape_listings(
    launcher: &dyn BrowserLauncher,
    automation: &AutomationConfig,
    site: SiteKind,
    search_url: &str,
    layout: &CardLayout,
) -> Vec<JobPosting> {
    info!(site = %site, search_url, "searching job listings");
    match collect_cards(launcher, automation, site, search_url, layout) {
        Ok(jobs) => {
            info!(site = %site, job_count = jobs.len(), "job search finished");
            jobs
        }
        Err(err) => {
            warn!(site = %site, error = %err, "job search failed, returning no results");
            Vec::new()
        }
    }
}

fn collect_cards(
    launcher: &dyn BrowserLauncher,
    automation: &AutomationConfig,
    site: SiteKind,
    search_url: &str,
    layout: &CardLayout,
) -> Result<Vec<JobPosting>, BrowserError> {
    let page = launcher.open_page()?;
    page.goto(search_url)?;
    page.wait_for(&Locator::Css(layout.card), automation.results_timeout)?;

    let payload = page.evaluate(&layout.script())?;
    let cards: Vec<RawCard> = serde_json::from_value(payload)
        .map_err(|err| BrowserError::Script(format!("unexpected card payload: {err}")))?;

    Ok(cards
        .into_iter()
        .take(MAX_RESULTS_PER_SITE)
        .map(|card| card.into_posting(site, layout.origin))
        .collect())
}
