use job_autopilot::browser::ChromeLauncher;
use job_autopilot::config::AppConfig;
use job_autopilot::workflows::{ExperienceLevel, JobAutomationService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the job service over a Chrome launcher configured from `config`.
pub(crate) fn chrome_service(config: &AppConfig) -> JobAutomationService {
    let launcher = Arc::new(ChromeLauncher::new(config.browser.clone()));
    JobAutomationService::from_config(launcher, config)
}

pub(crate) fn parse_level(raw: &str) -> Result<ExperienceLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "entry" => Ok(ExperienceLevel::Entry),
        "mid" => Ok(ExperienceLevel::Mid),
        "senior" => Ok(ExperienceLevel::Senior),
        other => Err(format!(
            "unknown experience level '{other}' (expected entry, mid, or senior)"
        )),
    }
}
