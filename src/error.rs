use thiserror::Error;

/// Errors surfaced by the scraping pipeline.
///
/// A fetch-level failure (`Fetch`, `Status`, `Browser`) is distinct from an
/// extraction that simply found nothing: extractors degrade missing fields to
/// `None`/`vec![]` and never return an error for them, so a caller can always
/// tell "no pages found" apart from "could not retrieve".
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed for {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("browser session failed for {url}: {message}")]
    Browser { url: String, message: String },

    #[error("scrape cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn fetch(url: &str, source: reqwest::Error) -> Self {
        ScrapeError::Fetch {
            url: url.to_string(),
            source,
        }
    }

    pub fn browser(url: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Browser {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
