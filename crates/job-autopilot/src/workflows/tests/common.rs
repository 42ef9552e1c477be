use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::{json, Value};

use crate::browser::{BrowserError, BrowserLauncher, BrowserPage, Locator, PageSession};
use crate::config::AutomationConfig;
use crate::workflows::domain::{
    ApplicationOutcome, ApplicationStatus, ExperienceLevel, JobPosting, SiteKind,
};
use crate::workflows::profile::{CandidateProfile, ResumeParser};
use crate::workflows::service::JobAutomationService;
use crate::workflows::sites::SiteAdapter;

pub(super) const LINKEDIN_JOB: &str = "https://www.linkedin.com/jobs/view/3790001";
pub(super) const NAUKRI_JOB: &str = "https://www.naukri.com/job-listings-rust-developer-4400";

pub(super) fn instant() -> AutomationConfig {
    AutomationConfig {
        results_timeout: Duration::from_millis(50),
        settle_unit: Duration::ZERO,
        apply_concurrency: 2,
    }
}

pub(super) fn profile() -> CandidateProfile {
    CandidateProfile::fallback()
}

/// Elements a click adds to or removes from the page.
#[derive(Debug, Clone, Default)]
pub(super) struct ClickEffect {
    pub show: Vec<Locator>,
    pub hide: Vec<Locator>,
}

/// Initial state of every page a [`ScriptedLauncher`] opens.
#[derive(Debug, Clone, Default)]
pub(super) struct PageScript {
    pub present: HashSet<Locator>,
    pub labels: HashMap<Locator, String>,
    pub effects: HashMap<Locator, ClickEffect>,
    pub navigation_error: Option<String>,
    pub cards: Value,
}

impl PageScript {
    pub fn with_present(mut self, locators: &[Locator]) -> Self {
        self.present.extend(locators.iter().copied());
        self
    }

    pub fn with_label(mut self, locator: Locator, label: &str) -> Self {
        self.labels.insert(locator, label.to_string());
        self
    }

    pub fn on_click(mut self, locator: Locator, show: &[Locator], hide: &[Locator]) -> Self {
        self.effects.insert(
            locator,
            ClickEffect {
                show: show.to_vec(),
                hide: hide.to_vec(),
            },
        );
        self
    }

    pub fn failing_navigation(mut self, reason: &str) -> Self {
        self.navigation_error = Some(reason.to_string());
        self
    }

    pub fn with_cards(mut self, cards: Value) -> Self {
        self.cards = cards;
        self
    }
}

#[derive(Debug, Default)]
pub(super) struct Journal {
    pub opened: usize,
    pub closed: usize,
    pub visited: Vec<String>,
    pub clicks: Vec<Locator>,
    pub fills: Vec<(Locator, String, bool)>,
}

struct ScriptedPage {
    present: Mutex<HashSet<Locator>>,
    script: PageScript,
    journal: Arc<Mutex<Journal>>,
}

impl BrowserPage for ScriptedPage {
    fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.journal
            .lock()
            .expect("journal lock")
            .visited
            .push(url.to_string());
        match &self.script.navigation_error {
            Some(reason) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        if self.exists(locator)? {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                target: locator.to_string(),
                timeout,
            })
        }
    }

    fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let present = self.present.lock().expect("page lock");
        Ok(usize::from(present.contains(locator)))
    }

    fn text(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        if !self.exists(locator)? {
            return Ok(None);
        }
        Ok(Some(
            self.script.labels.get(locator).cloned().unwrap_or_default(),
        ))
    }

    fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        if !self.exists(locator)? {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        self.journal
            .lock()
            .expect("journal lock")
            .clicks
            .push(*locator);

        if let Some(effect) = self.script.effects.get(locator) {
            let mut present = self.present.lock().expect("page lock");
            for hidden in &effect.hide {
                present.remove(hidden);
            }
            present.extend(effect.show.iter().copied());
        }
        Ok(())
    }

    fn fill(&self, locator: &Locator, value: &str, clear_first: bool) -> Result<(), BrowserError> {
        if !self.exists(locator)? {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        self.journal.lock().expect("journal lock").fills.push((
            *locator,
            value.to_string(),
            clear_first,
        ));
        Ok(())
    }

    fn evaluate(&self, _script: &str) -> Result<Value, BrowserError> {
        Ok(self.script.cards.clone())
    }

    fn close(&self) -> Result<(), BrowserError> {
        self.journal.lock().expect("journal lock").closed += 1;
        Ok(())
    }
}

/// Launcher handing out pages that follow one [`PageScript`] and report into a shared journal.
pub(super) struct ScriptedLauncher {
    script: PageScript,
    launch_error: Option<String>,
    pub journal: Arc<Mutex<Journal>>,
}

impl ScriptedLauncher {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            launch_error: None,
            journal: Arc::new(Mutex::new(Journal::default())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            launch_error: Some(reason.to_string()),
            ..Self::new(PageScript::default())
        }
    }

    pub fn snapshot<T>(&self, read: impl FnOnce(&Journal) -> T) -> T {
        read(&self.journal.lock().expect("journal lock"))
    }
}

impl BrowserLauncher for ScriptedLauncher {
    fn open_page(&self) -> Result<PageSession, BrowserError> {
        if let Some(reason) = &self.launch_error {
            return Err(BrowserError::Launch(reason.clone()));
        }
        self.journal.lock().expect("journal lock").opened += 1;
        Ok(PageSession::new(Box::new(ScriptedPage {
            present: Mutex::new(self.script.present.clone()),
            script: self.script.clone(),
            journal: self.journal.clone(),
        })))
    }
}

pub(super) fn card(title: &str, href: &str, posted: &str) -> Value {
    json!({
        "title": title,
        "company": "Globex",
        "location": "Bengaluru",
        "href": href,
        "postedDate": posted,
        "experience": "",
    })
}

pub(super) fn cards(count: usize, posted: &str) -> Value {
    Value::Array(
        (0..count)
            .map(|index| {
                card(
                    &format!("Rust Engineer {index}"),
                    &format!("https://www.linkedin.com/jobs/view/{index}"),
                    posted,
                )
            })
            .collect(),
    )
}

pub(super) fn posting(source: SiteKind, title: &str, posted: &str) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        company: "Initech".to_string(),
        location: "Remote".to_string(),
        source,
        url: format!("https://www.{}/jobs/{}", source.domain(), title.len()),
        posted_date: posted.to_string(),
        experience: String::new(),
        description: String::new(),
    }
}

/// Adapter with canned search results that records every call.
pub(super) struct RecordingAdapter {
    pub kind: SiteKind,
    pub jobs: Vec<JobPosting>,
    pub status: ApplicationStatus,
    pub searches: Mutex<Vec<(String, ExperienceLevel)>>,
    pub applications: Mutex<Vec<String>>,
}

impl RecordingAdapter {
    pub fn new(kind: SiteKind, jobs: Vec<JobPosting>) -> Self {
        Self {
            kind,
            jobs,
            status: ApplicationStatus::Applied,
            searches: Mutex::new(Vec::new()),
            applications: Mutex::new(Vec::new()),
        }
    }
}

impl SiteAdapter for RecordingAdapter {
    fn kind(&self) -> SiteKind {
        self.kind
    }

    fn search(&self, title: &str, level: ExperienceLevel) -> Vec<JobPosting> {
        self.searches
            .lock()
            .expect("search lock")
            .push((title.to_string(), level));
        self.jobs.clone()
    }

    fn apply(&self, job_url: &str, _profile: &CandidateProfile) -> ApplicationOutcome {
        self.applications
            .lock()
            .expect("apply lock")
            .push(job_url.to_string());
        ApplicationOutcome::new(job_url, self.status, format!("{} handled", self.kind))
    }
}

/// Adapter whose worker thread panics on every call.
pub(super) struct PanickingAdapter(pub SiteKind);

impl SiteAdapter for PanickingAdapter {
    fn kind(&self) -> SiteKind {
        self.0
    }

    fn search(&self, _title: &str, _level: ExperienceLevel) -> Vec<JobPosting> {
        panic!("search worker crashed")
    }

    fn apply(&self, _job_url: &str, _profile: &CandidateProfile) -> ApplicationOutcome {
        panic!("apply worker crashed")
    }
}

pub(super) fn service_with(adapters: Vec<Arc<dyn SiteAdapter>>) -> JobAutomationService {
    JobAutomationService::new(
        adapters,
        ResumeParser::default(),
        "/definitely/not/here/resume.pdf".into(),
        2,
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
