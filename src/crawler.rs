//! Full-series orchestration.
//!
//! Chapters are processed strictly sequentially with fixed inter-request
//! delays; parallelism would defeat the throttling that keeps the source site
//! from blocking the scrape. The only shared state is the series being
//! filled in, so no locking is involved.

use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::browser_client::Renderer;
use crate::error::ScrapeError;
use crate::http_client::Fetcher;
use crate::models::ComicSeries;
use crate::pages::scrape_chapter_pages;
use crate::series::scrape_series;

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Keep only the most-recent-first prefix of the chapter list
    pub max_chapters: Option<usize>,
    pub delay_between_chapters_ms: u64,
    pub delay_between_pages_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_chapters: None,
            delay_between_chapters_ms: 2000,
            delay_between_pages_ms: 500,
        }
    }
}

/// Scrape a series and every chapter's pages.
///
/// Per-chapter failures are logged and leave that chapter with zero pages;
/// the run continues. Only the initial series fetch and cancellation abort
/// the whole scrape. `total_chapters` is rewritten to the count actually
/// processed, which may be less than the site's full list when capped.
pub async fn scrape_full_series(
    fetcher: &dyn Fetcher,
    renderer: &dyn Renderer,
    series_url: &str,
    options: &ScrapeOptions,
    cancel: &CancellationToken,
) -> Result<ComicSeries, ScrapeError> {
    let mut series = scrape_series(fetcher, series_url).await?;

    if let Some(max) = options.max_chapters {
        series.chapters.truncate(max);
    }
    let total = series.chapters.len();
    log::info!("scraping {} chapters of {}", total, series.title);

    for i in 0..total {
        if cancel.is_cancelled() {
            return Err(ScrapeError::Cancelled);
        }

        let chapter_url = series.chapters[i].url.clone();
        let chapter_title = series.chapters[i].title.clone();
        log::info!("chapter {}/{}: {}", i + 1, total, chapter_title);

        match scrape_chapter_pages(fetcher, renderer, &chapter_url, options.delay_between_pages_ms)
            .await
        {
            Ok(pages) => {
                let chapter = &mut series.chapters[i];
                chapter.page_count = pages.len();
                chapter.pages = pages;
            }
            Err(e) => {
                log::error!("failed to scrape chapter {}: {}", chapter_title, e);
            }
        }

        if i + 1 < total && options.delay_between_chapters_ms > 0 {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ScrapeError::Cancelled),
                _ = sleep(Duration::from_millis(options.delay_between_chapters_ms)) => {}
            }
        }
    }

    series.total_chapters = total;
    Ok(series)
}
