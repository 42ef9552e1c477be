use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::browser::{BrowserError, BrowserLauncher, BrowserPage, Locator};
use crate::config::AutomationConfig;
use crate::workflows::domain::{ApplicationOutcome, ApplicationStatus, SiteKind};
use crate::workflows::profile::CandidateProfile;

/// Upper bound on wizard screens advanced through in one attempt.
pub const MAX_FORM_STEPS: usize = 5;

const STEP_SETTLE_UNITS: u32 = 2;
const SUBMIT_SETTLE_UNITS: u32 = 3;
const SUBMIT_LABELS: [&str; 2] = ["submit", "send application"];

pub(crate) const ALREADY_APPLIED_MESSAGE: &str = "Already applied to this position";
pub(crate) const APPLIED_MESSAGE: &str = "Successfully applied to the position";
pub(crate) const INCOMPLETE_MESSAGE: &str = "Application process incomplete or failed";

/// Position of an attempt within the application wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NotStarted,
    Navigated,
    AlreadyApplied,
    ApplyUnavailable,
    InProgress,
    Step(usize),
    Terminal(ApplicationStatus),
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::NotStarted => f.write_str("not_started"),
            FlowState::Navigated => f.write_str("navigated"),
            FlowState::AlreadyApplied => f.write_str("already_applied"),
            FlowState::ApplyUnavailable => f.write_str("apply_unavailable"),
            FlowState::InProgress => f.write_str("in_progress"),
            FlowState::Step(step) => write!(f, "step_{step}"),
            FlowState::Terminal(status) => write!(f, "terminal_{}", status.label()),
        }
    }
}

/// Site-specific parameters of the shared application state machine.
#[derive(Clone, Copy)]
pub(crate) struct ApplyFlow {
    pub site: SiteKind,
    /// Present once the site considers the candidate applied, before or after the wizard.
    pub status_indicator: Locator,
    pub entry_controls: &'static [Locator],
    pub entry_settle_units: u32,
    pub unavailable_message: &'static str,
    pub phone_field: Option<Locator>,
    pub message_fields: &'static [Locator],
    /// Tried in order on every step; the first present control is activated.
    pub advance_controls: &'static [Locator],
    pub cover_letter: fn(&CandidateProfile) -> String,
}

struct Attempt<'a> {
    flow: &'a ApplyFlow,
    automation: &'a AutomationConfig,
    job_url: &'a str,
    state: FlowState,
    trail: Vec<FlowState>,
}

impl ApplyFlow {
    /// Drives one attempt to a terminal outcome; every fault becomes a `failed` outcome.
    pub(crate) fn execute(
        &self,
        launcher: &dyn BrowserLauncher,
        automation: &AutomationConfig,
        job_url: &str,
        profile: &CandidateProfile,
    ) -> ApplicationOutcome {
        self.trace(launcher, automation, job_url, profile).0
    }

    /// Like [`ApplyFlow::execute`], also returning every state entered after `NotStarted`.
    pub(crate) fn trace(
        &self,
        launcher: &dyn BrowserLauncher,
        automation: &AutomationConfig,
        job_url: &str,
        profile: &CandidateProfile,
    ) -> (ApplicationOutcome, Vec<FlowState>) {
        info!(site = %self.site, job_url, "starting application");

        let mut attempt = Attempt {
            flow: self,
            automation,
            job_url,
            state: FlowState::NotStarted,
            trail: Vec::new(),
        };

        let outcome = match attempt.drive(launcher, profile) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(site = %self.site, job_url, error = %err, "application attempt failed");
                ApplicationOutcome::failed(job_url, format!("Application failed: {err}"))
            }
        };

        attempt.enter(FlowState::Terminal(outcome.status));
        info!(
            site = %self.site,
            job_url,
            status = outcome.status.label(),
            steps = attempt.trail.len(),
            "application finished"
        );
        (outcome, attempt.trail)
    }
}

impl Attempt<'_> {
    fn enter(&mut self, next: FlowState) {
        debug!(
            site = %self.flow.site,
            job_url = self.job_url,
            from = %self.state,
            to = %next,
            "application state change"
        );
        self.state = next;
        self.trail.push(next);
    }

    fn settle(&self, units: u32) {
        let pause = self.automation.settle(units);
        if pause > Duration::ZERO {
            std::thread::sleep(pause);
        }
    }

    fn drive(
        &mut self,
        launcher: &dyn BrowserLauncher,
        profile: &CandidateProfile,
    ) -> Result<ApplicationOutcome, BrowserError> {
        let flow = self.flow;
        let page = launcher.open_page()?;

        page.goto(self.job_url)?;
        self.enter(FlowState::Navigated);

        if page.exists(&flow.status_indicator)? {
            self.enter(FlowState::AlreadyApplied);
            return Ok(ApplicationOutcome::new(
                self.job_url,
                ApplicationStatus::AlreadyApplied,
                ALREADY_APPLIED_MESSAGE,
            ));
        }

        let Some(entry) = first_present(&*page, flow.entry_controls)? else {
            self.enter(FlowState::ApplyUnavailable);
            return Ok(ApplicationOutcome::failed(
                self.job_url,
                flow.unavailable_message,
            ));
        };

        page.click(&entry)?;
        self.settle(flow.entry_settle_units);
        self.enter(FlowState::InProgress);

        self.fill_known_fields(&*page, profile)?;

        for step in 1..=MAX_FORM_STEPS {
            let Some(control) = first_present(&*page, flow.advance_controls)? else {
                debug!(job_url = self.job_url, step, "no advance control left");
                break;
            };
            self.enter(FlowState::Step(step));

            let label = page.text(&control)?.unwrap_or_default().to_lowercase();
            page.click(&control)?;

            if SUBMIT_LABELS.iter().any(|submit| label.contains(submit)) {
                self.settle(SUBMIT_SETTLE_UNITS);
                break;
            }
            self.settle(STEP_SETTLE_UNITS);
        }

        if page.exists(&flow.status_indicator)? {
            Ok(ApplicationOutcome::new(
                self.job_url,
                ApplicationStatus::Applied,
                APPLIED_MESSAGE,
            ))
        } else {
            Ok(ApplicationOutcome::failed(self.job_url, INCOMPLETE_MESSAGE))
        }
    }

    fn fill_known_fields(
        &self,
        page: &dyn BrowserPage,
        profile: &CandidateProfile,
    ) -> Result<(), BrowserError> {
        if let Some(phone) = self.flow.phone_field {
            if page.exists(&phone)? {
                page.fill(&phone, &profile.personal_info.phone, true)?;
            }
        }

        if let Some(message) = first_present(page, self.flow.message_fields)? {
            page.fill(&message, &(self.flow.cover_letter)(profile), false)?;
        }
        Ok(())
    }
}

fn first_present(
    page: &dyn BrowserPage,
    candidates: &[Locator],
) -> Result<Option<Locator>, BrowserError> {
    for candidate in candidates {
        if page.exists(candidate)? {
            return Ok(Some(*candidate));
        }
    }
    Ok(None)
}
