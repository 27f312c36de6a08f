//! Series landing page extraction.
//!
//! A pure document-to-entity transform: every field has its own fallback
//! chain and degrades to empty/absent instead of failing the extraction, so
//! hostile or partial markup still yields a usable record.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::helpers::{resolve_site_url, series_id_from_url};
use crate::http_client::Fetcher;
use crate::models::{ComicChapter, ComicSeries};

static TITLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*comic\s*\|\s*read.*").unwrap());
static TRAILING_INFO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+information\s*$").unwrap());
static SUMMARY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^summary:\s*").unwrap());
static STATUS_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)status:\s*").unwrap());

/// Long description blocks are recognized by these plot-indicative words.
const DESCRIPTION_KEYWORDS: &[&str] = &["alien", "invasion", "spider"];

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Fetch a series landing page and extract it. Chapters come back with empty
/// page lists; the crawler fills those in.
pub async fn scrape_series(
    fetcher: &dyn Fetcher,
    series_url: &str,
) -> Result<ComicSeries, ScrapeError> {
    log::info!("scraping series: {}", series_url);
    let html = fetcher.fetch(series_url).await?;
    Ok(parse_series(&html, series_url))
}

/// Pure document -> Series transform. Never fails; missing fields degrade.
pub fn parse_series(html: &str, series_url: &str) -> ComicSeries {
    let doc = Html::parse_document(html);

    let chapters = extract_chapters(&doc);
    let total_chapters = chapters.len();
    let (author, publisher, status) = extract_metadata(&doc);

    ComicSeries {
        id: series_id_from_url(series_url),
        title: extract_title(&doc),
        description: extract_description(&doc),
        cover_image: extract_cover(&doc),
        author,
        publisher,
        genres: extract_genres(&doc),
        status,
        url: series_url.to_string(),
        chapters,
        total_chapters,
    }
}

/// Title: first series-detail link, else the document title with site
/// boilerplate stripped; a trailing "information" label is dropped either way.
fn extract_title(doc: &Html) -> String {
    let comic_link = Selector::parse("a[href*='/Comic/']").unwrap();
    let title_sel = Selector::parse("title").unwrap();

    let mut title = doc
        .select(&comic_link)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_default();

    if title.is_empty() || title.contains("information") {
        if let Some(el) = doc.select(&title_sel).next() {
            title = TITLE_SUFFIX_RE.replace(&text_of(&el), "").trim().to_string();
        }
    }

    TRAILING_INFO_RE.replace(&title, "").trim().to_string()
}

/// Description: first long paragraph carrying a plot keyword, else the first
/// "Summary:" paragraph with substantial content after the label.
fn extract_description(doc: &Html) -> Option<String> {
    let p_sel = Selector::parse("p").unwrap();

    for p in doc.select(&p_sel) {
        let text = text_of(&p);
        let lower = text.to_lowercase();

        if text.len() > 100 && DESCRIPTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Some(SUMMARY_PREFIX_RE.replace(&text, "").trim().to_string());
        }

        if lower.contains("summary:") {
            let stripped = SUMMARY_PREFIX_RE.replace(&text, "").trim().to_string();
            if stripped.len() > 50 {
                return Some(stripped);
            }
        }
    }

    None
}

fn usable_cover_src(img: &ElementRef) -> Option<String> {
    let src = img.value().attr("src")?;
    if src.is_empty() || src.contains("user-small") || src.contains("logo") {
        return None;
    }
    Some(resolve_site_url(src))
}

/// Cover: an image next to (or inside) the element labeled exactly "Cover",
/// excluding avatars and the site logo; attribute-pattern fallbacks after.
fn extract_cover(doc: &Html) -> Option<String> {
    let any_sel = Selector::parse("*").unwrap();
    let img_sel = Selector::parse("img").unwrap();

    for el in doc.select(&any_sel) {
        if text_of(&el) != "Cover" {
            continue;
        }
        let siblings = el.prev_siblings().chain(el.next_siblings());
        for node in siblings {
            let Some(sib) = ElementRef::wrap(node) else {
                continue;
            };
            if sib.value().name() != "img" {
                continue;
            }
            if let Some(src) = usable_cover_src(&sib) {
                return Some(src);
            }
        }
        for img in el.select(&img_sel) {
            if let Some(src) = usable_cover_src(&img) {
                return Some(src);
            }
        }
    }

    for selector in ["img[src*='cover']", ".manga-detail-top img", "img[alt*='cover']"] {
        let sel = Selector::parse(selector).unwrap();
        if let Some(img) = doc.select(&sel).next() {
            if let Some(src) = img.value().attr("src") {
                if !src.is_empty() {
                    return Some(resolve_site_url(src));
                }
            }
        }
    }

    None
}

/// Writer/Publisher/Status labels scanned out of the metadata paragraphs.
fn extract_metadata(doc: &Html) -> (Option<String>, Option<String>, Option<String>) {
    let p_sel = Selector::parse("p").unwrap();
    let a_sel = Selector::parse("a").unwrap();

    let mut author = None;
    let mut publisher = None;
    let mut status = None;

    for p in doc.select(&p_sel) {
        let text = text_of(&p);

        if author.is_none() && text.contains("Writer:") {
            author = p
                .select(&a_sel)
                .next()
                .map(|a| text_of(&a))
                .filter(|s| !s.is_empty());
        }
        if publisher.is_none() && text.contains("Publisher:") {
            publisher = p
                .select(&a_sel)
                .next()
                .map(|a| text_of(&a))
                .filter(|s| !s.is_empty());
        }
        if status.is_none() && text.contains("Status:") {
            // first token after the label, trailing descriptive text dropped
            status = STATUS_PREFIX_RE
                .replace(&text, "")
                .split_whitespace()
                .next()
                .map(str::to_string)
                .filter(|s| !s.is_empty());
        }
    }

    (author, publisher, status)
}

/// Genre tag links, deduplicated, insertion order preserved.
fn extract_genres(doc: &Html) -> Vec<String> {
    let genre_sel = Selector::parse("a[href*='/Genre/']").unwrap();

    let mut genres: Vec<String> = Vec::new();
    for a in doc.select(&genre_sel) {
        let genre = text_of(&a);
        if !genre.is_empty() && !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    genres
}

/// Chapter listing: the strict listing-table selector first, then a looser
/// issue-link pass if that found nothing. Source tables list oldest-first, so
/// the collected list is reversed to read most-recent-first.
fn extract_chapters(doc: &Html) -> Vec<ComicChapter> {
    let strict_rows = Selector::parse("table.listing tbody tr").unwrap();
    let first_cell_link = Selector::parse("td:first-child a").unwrap();

    let mut chapters = collect_chapter_rows(doc, &strict_rows, &first_cell_link);

    if chapters.is_empty() {
        log::debug!("no chapters in listing table, retrying with issue-link selector");
        let loose_rows = Selector::parse("table tbody tr").unwrap();
        let issue_link = Selector::parse("a[href*='/Issue-']").unwrap();
        chapters = collect_chapter_rows(doc, &loose_rows, &issue_link);
    }

    chapters.reverse();
    chapters
}

fn collect_chapter_rows(
    doc: &Html,
    row_sel: &Selector,
    link_sel: &Selector,
) -> Vec<ComicChapter> {
    let th_sel = Selector::parse("th").unwrap();

    let mut chapters = Vec::new();
    for row in doc.select(row_sel) {
        // header rows
        if row.select(&th_sel).next().is_some() {
            continue;
        }
        let Some(link) = row.select(link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = text_of(&link);
        if href.is_empty() || title.is_empty() {
            continue;
        }

        chapters.push(ComicChapter {
            id: format!("chapter-{}", chapters.len() + 1),
            title,
            url: resolve_site_url(href),
            pages: Vec::new(),
            page_count: 0,
        });
    }
    chapters
}
