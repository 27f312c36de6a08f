//! Chapter page extraction.
//!
//! The reader page builds its image list with scripts, so the chapter is
//! fetched in rendered mode first and the extraction runs over the DOM
//! snapshot. Three strategies are tried in order, each only when the previous
//! yield stayed under the plausibility threshold: images inside the reader
//! container, a regex scan of inline scripts, then every image in the
//! document. Candidates pass the validity/dedup predicates in `helpers`
//! before being numbered. When every accepted URL carries a numeric filename
//! code the list is re-sorted by that code; DOM order is only a fallback
//! ordering signal.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;

use crate::browser_client::Renderer;
use crate::error::ScrapeError;
use crate::helpers::{absolutize_image_src, is_valid_comic_page, normalize_page_url, page_sort_code};
use crate::http_client::Fetcher;
use crate::models::ComicPage;

/// Reader container the site loads page images into
pub const READER_CONTAINER: &str = "#divImage";

/// Below this count a strategy's yield is considered implausible and the next
/// strategy is tried as a supplement.
const MIN_EXPECTED_PAGES: usize = 5;

static SCRIPT_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s"']+blogspot[^\s"']*\.(jpg|jpeg|png|webp)(\?[^\s"']*)?"#)
        .unwrap()
});

/// Accumulates validated, deduplicated pages in acceptance order.
struct PageCollector {
    pages: Vec<ComicPage>,
    seen: HashSet<String>,
}

impl PageCollector {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn offer(&mut self, raw: &str) {
        if raw.is_empty() || raw.contains("data:image") {
            return;
        }
        let url = absolutize_image_src(raw);
        if !is_valid_comic_page(&url) {
            return;
        }
        if !self.seen.insert(normalize_page_url(&url)) {
            return;
        }
        self.pages.push(ComicPage {
            page_number: self.pages.len() as u32 + 1,
            image_url: url,
        });
    }
}

fn collect_container_images(doc: &Html, collector: &mut PageCollector) {
    let sel = Selector::parse("#divImage img").unwrap();
    for img in doc.select(&sel) {
        if let Some(src) = img.value().attr("src") {
            collector.offer(src);
        }
    }
}

fn collect_script_images(doc: &Html, collector: &mut PageCollector) {
    let sel = Selector::parse("script").unwrap();
    for script in doc.select(&sel) {
        let content: String = script.text().collect();
        for m in SCRIPT_IMAGE_RE.find_iter(&content) {
            collector.offer(m.as_str());
        }
    }
}

fn collect_all_images(doc: &Html, collector: &mut PageCollector) {
    let sel = Selector::parse("img").unwrap();
    for img in doc.select(&sel) {
        if let Some(src) = img.value().attr("src") {
            collector.offer(src);
        }
    }
}

/// Re-sort by the numeric filename code when every page has one, then
/// renumber 1..N.
fn finalize(mut pages: Vec<ComicPage>) -> Vec<ComicPage> {
    let all_coded = !pages.is_empty()
        && pages
            .iter()
            .all(|p| page_sort_code(&p.image_url).is_some());
    if all_coded {
        pages.sort_by_key(|p| page_sort_code(&p.image_url).unwrap_or(u64::MAX));
    }
    for (i, page) in pages.iter_mut().enumerate() {
        page.page_number = i as u32 + 1;
    }
    pages
}

/// Extraction over a rendered DOM snapshot.
pub fn extract_pages(html: &str) -> Vec<ComicPage> {
    let doc = Html::parse_document(html);
    let mut collector = PageCollector::new();

    collect_container_images(&doc, &mut collector);
    if collector.pages.len() < MIN_EXPECTED_PAGES {
        collect_script_images(&doc, &mut collector);
    }
    if collector.pages.len() < MIN_EXPECTED_PAGES {
        collect_all_images(&doc, &mut collector);
    }

    finalize(collector.pages)
}

/// Extraction over a static document. Same strategy ladder, plus a
/// cross-check against the on-page page-count `<select>`: when the container
/// yielded fewer images than the selector advertises, the script scan
/// supplements before the result is accepted.
pub fn extract_pages_static(html: &str) -> Vec<ComicPage> {
    let doc = Html::parse_document(html);
    let mut collector = PageCollector::new();

    collect_container_images(&doc, &mut collector);

    let option_sel = Selector::parse("select option").unwrap();
    let expected = doc.select(&option_sel).count();
    if !collector.pages.is_empty() && collector.pages.len() < expected {
        collect_script_images(&doc, &mut collector);
    }

    if collector.pages.len() < MIN_EXPECTED_PAGES {
        collect_script_images(&doc, &mut collector);
    }
    if collector.pages.len() < MIN_EXPECTED_PAGES {
        collect_all_images(&doc, &mut collector);
    }

    finalize(collector.pages)
}

/// Fetch a chapter and extract its pages: rendered mode first, static
/// fallback only on a hard fetch failure. A fetch failure in both modes
/// propagates so the caller can tell "could not retrieve" from a genuinely
/// zero-page chapter.
pub async fn scrape_chapter_pages(
    fetcher: &dyn Fetcher,
    renderer: &dyn Renderer,
    chapter_url: &str,
    delay_ms: u64,
) -> Result<Vec<ComicPage>, ScrapeError> {
    log::info!("scraping chapter pages: {}", chapter_url);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    match renderer.render(chapter_url, Some(READER_CONTAINER)) {
        Ok(html) => {
            let pages = extract_pages(&html);
            log::info!("found {} pages for {}", pages.len(), chapter_url);
            Ok(pages)
        }
        Err(e) => {
            log::warn!(
                "rendered fetch failed for {}, falling back to static: {}",
                chapter_url,
                e
            );
            let html = fetcher.fetch(chapter_url).await?;
            let pages = extract_pages_static(&html);
            log::info!("found {} pages for {} (static)", pages.len(), chapter_url);
            Ok(pages)
        }
    }
}
