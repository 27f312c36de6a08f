use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::time::Duration;

use crate::error::ScrapeError;
use crate::http_client::USER_AGENT;

/// Configuration for rendered-mode retrieval
#[derive(Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Bound on navigation and the initial document wait
    pub nav_timeout: Duration,
    /// Bound on the best-effort wait for a named anchor element
    pub dom_wait_timeout: Duration,
    /// Fixed pause after navigation so script-inserted images land in the DOM
    pub settle_delay: Duration,
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            nav_timeout: Duration::from_secs(30),
            dom_wait_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(2),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Rendered-mode document retrieval: a full browser engine executes the
/// page's scripts and the live DOM is snapshotted as HTML. Kept behind a
/// trait so extractors can be exercised against canned fixtures.
pub trait Renderer: Send + Sync {
    /// Navigate to `url`, optionally wait for `wait_for` to appear
    /// (best-effort), and return the rendered document.
    fn render(&self, url: &str, wait_for: Option<&str>) -> Result<String, ScrapeError>;
}

/// Renderer backed by a headless Chrome instance. Each call launches an
/// isolated browser that is torn down on every exit path, success or failure.
pub struct ChromeRenderer {
    config: BrowserConfig,
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self::with_config(BrowserConfig::default())
    }

    pub fn with_config(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn launch(&self, url: &str) -> Result<Browser, ScrapeError> {
        let user_agent_arg = format!("--user-agent={}", self.config.user_agent);
        let args: Vec<&OsStr> = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-setuid-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new(&user_agent_arg),
        ];

        let launch_options = LaunchOptions::default_builder()
            .headless(self.config.headless)
            .window_size(Some((self.config.window_width, self.config.window_height)))
            .args(args)
            .build()
            .map_err(|e| ScrapeError::browser(url, e))?;

        Browser::new(launch_options).map_err(|e| ScrapeError::browser(url, e))
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, url: &str, wait_for: Option<&str>) -> Result<String, ScrapeError> {
        log::info!("browser navigating to: {}", url);

        // The browser is dropped (and closed) when this scope unwinds,
        // whichever path returns.
        let browser = self.launch(url)?;
        let tab = browser.new_tab().map_err(|e| ScrapeError::browser(url, e))?;

        tab.navigate_to(url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| ScrapeError::browser(url, e))?;
        tab.wait_for_element_with_custom_timeout("body", self.config.nav_timeout)
            .map_err(|e| ScrapeError::browser(url, e))?;

        if let Some(selector) = wait_for {
            if tab
                .wait_for_element_with_custom_timeout(selector, self.config.dom_wait_timeout)
                .is_err()
            {
                log::debug!("anchor {} never appeared on {}, continuing", selector, url);
            }
        }

        std::thread::sleep(self.config.settle_delay);

        tab.get_content().map_err(|e| ScrapeError::browser(url, e))
    }
}
