//! Browser capability consumed by the site adapters.
//!
//! Adapters only see [`BrowserPage`] and [`BrowserLauncher`]; the Chrome-backed implementation
//! lives in [`chrome`] and tests substitute scripted pages.

mod chrome;

use std::fmt;
use std::ops::Deref;
use std::time::Duration;

use tracing::warn;

pub use chrome::ChromeLauncher;

/// Identifies an element on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Standard CSS selector.
    Css(&'static str),
    /// A `<button>` whose normalized text contains the label.
    ButtonText(&'static str),
}

impl Locator {
    pub(crate) fn xpath(&self) -> Option<String> {
        match self {
            Locator::Css(_) => None,
            Locator::ButtonText(label) => Some(format!(
                "//button[contains(normalize-space(.), '{}')]",
                label.replace('\'', "")
            )),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "{selector}"),
            Locator::ButtonText(label) => write!(f, "button containing '{label}'"),
        }
    }
}

/// Renders a Rust string as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("timed out after {timeout:?} waiting for {target}")]
    Timeout { target: String, timeout: Duration },
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("page interaction failed: {0}")]
    Interaction(String),
    #[error("page script failed: {0}")]
    Script(String),
}

/// One isolated page. Every method is a blocking call into the browser.
pub trait BrowserPage: Send {
    /// Navigates and blocks until the page reports the load settled.
    fn goto(&self, url: &str) -> Result<(), BrowserError>;
    /// Waits for the element to appear, failing with [`BrowserError::Timeout`] past `timeout`.
    fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;
    fn count(&self, locator: &Locator) -> Result<usize, BrowserError>;
    fn text(&self, locator: &Locator) -> Result<Option<String>, BrowserError>;
    fn click(&self, locator: &Locator) -> Result<(), BrowserError>;
    fn fill(&self, locator: &Locator, value: &str, clear_first: bool) -> Result<(), BrowserError>;
    /// Evaluates a script whose completion value is a JSON document encoded as a string.
    fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError>;
    fn close(&self) -> Result<(), BrowserError>;

    fn exists(&self, locator: &Locator) -> Result<bool, BrowserError> {
        Ok(self.count(locator)? > 0)
    }
}

/// Factory for isolated pages; one call per search or application attempt.
pub trait BrowserLauncher: Send + Sync {
    fn open_page(&self) -> Result<PageSession, BrowserError>;
}

/// Owns a page for the duration of one attempt and closes it when dropped.
pub struct PageSession {
    page: Box<dyn BrowserPage>,
}

impl PageSession {
    pub fn new(page: Box<dyn BrowserPage>) -> Self {
        Self { page }
    }
}

impl Deref for PageSession {
    type Target = dyn BrowserPage;

    fn deref(&self) -> &Self::Target {
        self.page.as_ref()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if let Err(err) = self.page.close() {
            warn!(error = %err, "failed to release browser page");
        }
    }
}

impl fmt::Debug for PageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSession").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct ClosingPage {
        closed: Arc<AtomicBool>,
    }

    impl BrowserPage for ClosingPage {
        fn goto(&self, _url: &str) -> Result<(), BrowserError> {
            Err(BrowserError::Navigation {
                url: "https://example.test".to_string(),
                reason: "offline".to_string(),
            })
        }

        fn wait_for(&self, _locator: &Locator, _timeout: Duration) -> Result<(), BrowserError> {
            Ok(())
        }

        fn count(&self, _locator: &Locator) -> Result<usize, BrowserError> {
            Ok(0)
        }

        fn text(&self, _locator: &Locator) -> Result<Option<String>, BrowserError> {
            Ok(None)
        }

        fn click(&self, _locator: &Locator) -> Result<(), BrowserError> {
            Ok(())
        }

        fn fill(&self, _: &Locator, _: &str, _: bool) -> Result<(), BrowserError> {
            Ok(())
        }

        fn evaluate(&self, _script: &str) -> Result<serde_json::Value, BrowserError> {
            Ok(serde_json::Value::Null)
        }

        fn close(&self) -> Result<(), BrowserError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn session_closes_page_on_error_path() {
        let closed = Arc::new(AtomicBool::new(false));
        let attempt = || -> Result<(), BrowserError> {
            let session = PageSession::new(Box::new(ClosingPage {
                closed: closed.clone(),
            }));
            session.goto("https://example.test")?;
            Ok(())
        };

        assert!(attempt().is_err());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn button_text_locator_renders_xpath() {
        let locator = Locator::ButtonText("Next");
        assert_eq!(
            locator.xpath().as_deref(),
            Some("//button[contains(normalize-space(.), 'Next')]")
        );
        assert!(Locator::Css("button.apply").xpath().is_none());
        assert_eq!(locator.to_string(), "button containing 'Next'");
    }
}
