//! Series search against the site's search endpoint.

use scraper::{Html, Selector};

use crate::error::ScrapeError;
use crate::helpers::{resolve_site_url, BASE_URL};
use crate::http_client::Fetcher;
use crate::models::SearchResult;

/// Search for series matching `query`. Results come back in raw document
/// order, no deduplication or ranking.
pub async fn search_comics(
    fetcher: &dyn Fetcher,
    query: &str,
) -> Result<Vec<SearchResult>, ScrapeError> {
    let url = format!("{}/Search/{}", BASE_URL, urlencoding::encode(query));
    log::info!("searching: {}", url);
    let html = fetcher.fetch(&url).await?;
    Ok(parse_search_results(&html))
}

pub fn parse_search_results(html: &str) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(".item-title a, .manga-item a, a[href*='/Comic/']").unwrap();

    let mut results = Vec::new();
    for el in doc.select(&sel) {
        let title = el.text().collect::<String>().trim().to_string();
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if title.is_empty() || href.is_empty() {
            continue;
        }
        results.push(SearchResult {
            title,
            url: resolve_site_url(href),
        });
    }
    results
}
