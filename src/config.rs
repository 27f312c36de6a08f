use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::browser_client::BrowserConfig;
use crate::http_client::HttpClientConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding one JSON record per scraped series
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Bind address for the read-side API server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    /// Timeout for static HTTP fetches in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Browser navigation timeout in seconds
    #[serde(default = "default_timeout")]
    pub browser_timeout_secs: u64,

    /// How long to wait for the reader container to appear (best-effort)
    #[serde(default = "default_dom_wait")]
    pub dom_wait_timeout_secs: u64,

    /// Settle delay after navigation before snapshotting the DOM
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Pause between chapters of a series
    #[serde(default = "default_chapter_delay")]
    pub delay_between_chapters_ms: u64,

    /// Pause before each chapter-page fetch
    #[serde(default = "default_page_delay")]
    pub delay_between_pages_ms: u64,

    /// Browser headless mode
    #[serde(default = "default_true")]
    pub browser_headless: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_dom_wait() -> u64 {
    10
}
fn default_settle_delay() -> u64 {
    2000
}
fn default_chapter_delay() -> u64 {
    2000
}
fn default_page_delay() -> u64 {
    500
}
fn default_true() -> bool {
    true
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            browser_timeout_secs: 30,
            dom_wait_timeout_secs: 10,
            settle_delay_ms: 2000,
            delay_between_chapters_ms: 2000,
            delay_between_pages_ms: 500,
            browser_headless: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_addr: default_bind_addr(),
            scrape: ScrapeConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
                log::warn!("config.toml is malformed, using defaults");
            }
        }
        Self::default()
    }
}

impl ScrapeConfig {
    /// HTTP client configuration for static-mode fetches
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Browser configuration for rendered-mode fetches
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.browser_headless,
            nav_timeout: Duration::from_secs(self.browser_timeout_secs),
            dom_wait_timeout: Duration::from_secs(self.dom_wait_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            ..BrowserConfig::default()
        }
    }
}
