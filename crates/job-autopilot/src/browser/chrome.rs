use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::debug;

use super::{js_string, BrowserError, BrowserLauncher, BrowserPage, Locator, PageSession};
use crate::config::BrowserConfig;

const CHROME_ARGS: [&str; 3] = [
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
];

/// Launches one headless Chrome process per session so attempts never share state.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: BrowserConfig,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn launch_options(&self) -> Result<LaunchOptions<'static>, BrowserError> {
        LaunchOptions::default_builder()
            .headless(self.config.headless)
            .sandbox(false)
            .path(self.config.chrome_path.clone())
            .args(CHROME_ARGS.iter().map(OsStr::new).collect())
            .build()
            .map_err(|err| BrowserError::Launch(err.to_string()))
    }
}

impl BrowserLauncher for ChromeLauncher {
    fn open_page(&self) -> Result<PageSession, BrowserError> {
        let options = self.launch_options()?;
        let browser = Browser::new(options).map_err(|err| BrowserError::Launch(err.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|err| BrowserError::Launch(err.to_string()))?;
        tab.set_default_timeout(self.config.navigation_timeout);
        tab.set_user_agent(&self.config.user_agent, Some("en-US,en;q=0.9"), None)
            .map_err(|err| BrowserError::Launch(err.to_string()))?;

        debug!(headless = self.config.headless, "chrome page opened");
        Ok(PageSession::new(Box::new(ChromePage { browser, tab })))
    }
}

struct ChromePage {
    // Dropping the browser terminates the Chrome process.
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromePage {
    fn query_count_script(locator: &Locator) -> String {
        match locator.xpath() {
            Some(xpath) => format!(
                "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
                js_string(&xpath)
            ),
            None => format!(
                "document.querySelectorAll({}).length",
                js_string(&locator.to_string())
            ),
        }
    }

    fn element(&self, locator: &Locator) -> Result<headless_chrome::Element<'_>, BrowserError> {
        let found = match locator.xpath() {
            Some(xpath) => self.tab.find_element_by_xpath(&xpath),
            None => self.tab.find_element(&locator.to_string()),
        };
        found.map_err(|_| BrowserError::ElementNotFound(locator.to_string()))
    }

    fn raw_evaluate(&self, script: &str) -> Result<Option<serde_json::Value>, BrowserError> {
        self.tab
            .evaluate(script, false)
            .map(|object| object.value)
            .map_err(|err| BrowserError::Script(err.to_string()))
    }
}

impl BrowserPage for ChromePage {
    fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(|err| BrowserError::Navigation {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }

    fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        let waited = match locator.xpath() {
            Some(xpath) => self
                .tab
                .wait_for_xpath_with_custom_timeout(&xpath, timeout)
                .map(|_| ()),
            None => self
                .tab
                .wait_for_element_with_custom_timeout(&locator.to_string(), timeout)
                .map(|_| ()),
        };
        waited.map_err(|_| BrowserError::Timeout {
            target: locator.to_string(),
            timeout,
        })
    }

    fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let value = self.raw_evaluate(&Self::query_count_script(locator))?;
        Ok(value.and_then(|value| value.as_u64()).unwrap_or(0) as usize)
    }

    fn text(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        if !self.exists(locator)? {
            return Ok(None);
        }
        let text = self
            .element(locator)?
            .get_inner_text()
            .map_err(|err| BrowserError::Interaction(err.to_string()))?;
        Ok(Some(text.trim().to_string()))
    }

    fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.element(locator)?
            .click()
            .map(|_| ())
            .map_err(|err| BrowserError::Interaction(err.to_string()))
    }

    fn fill(&self, locator: &Locator, value: &str, clear_first: bool) -> Result<(), BrowserError> {
        let element = self.element(locator)?;
        if clear_first {
            element
                .call_js_fn("function() { this.value = ''; }", Vec::new(), false)
                .map_err(|err| BrowserError::Interaction(err.to_string()))?;
        }
        element
            .click()
            .and_then(|element| element.type_into(value))
            .map(|_| ())
            .map_err(|err| BrowserError::Interaction(err.to_string()))
    }

    fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError> {
        match self.raw_evaluate(script)? {
            Some(serde_json::Value::String(encoded)) => serde_json::from_str(&encoded)
                .map_err(|err| BrowserError::Script(format!("malformed script result: {err}"))),
            Some(other) => Ok(other),
            None => Ok(serde_json::Value::Null),
        }
    }

    fn close(&self) -> Result<(), BrowserError> {
        self.tab
            .close(true)
            .map(|_| ())
            .map_err(|err| BrowserError::Interaction(err.to_string()))
    }
}
