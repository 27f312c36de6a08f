//! URL predicates and normalization shared by the extractors.
//!
//! Page-image candidates come from three different places (the reader
//! container, inline scripts, the whole document) and the same asset shows up
//! with varying tracking parameters, so acceptance and deduplication live
//! here as pure functions.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

/// Base URL of the source site
pub const BASE_URL: &str = "https://readcomiconline.li";

/// Substrings that mark a URL as site chrome, ads, or share widgets rather
/// than a comic page.
const EXCLUDE_PATTERNS: &[&str] = &[
    "logo",
    "user-small",
    "read.png",
    "previous.png",
    "next.png",
    "error.png",
    "search.png",
    "button",
    "icon",
    "avatar",
    "advertisement",
    "ad",
    "banner",
    "widget",
    "sharethis",
    "facebook",
    "twitter",
    "google",
    "discord",
    "mgid.com",
    "a-ads.com",
    "lowseelor.com",
];

/// Hosts that actually serve page images for this site
const VALID_HOSTS: &[&str] = &["blogspot", "bp.blogspot", "blogger.com"];

static NUMERIC_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rco\d+\.(jpg|jpeg|png|webp)").unwrap());
static SIZE_SEGMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/s\d+/").unwrap());
static IMAGE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)(\?|$)").unwrap());
static FILENAME_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/([^/?#]+\.(jpg|jpeg|png|webp))$").unwrap());
static PAGE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)rco(\d+)").unwrap());

/// Whether a URL points at an actual comic page image.
///
/// Rejects anything on the denylist, then requires a known hosting provider
/// plus one of the recognized filename/path shapes.
pub fn is_valid_comic_page(url: &str) -> bool {
    let lower = url.to_lowercase();

    if EXCLUDE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return false;
    }

    let valid_host = VALID_HOSTS.iter().any(|h| lower.contains(h));

    let comic_shape = NUMERIC_FILENAME_RE.is_match(url)
        || SIZE_SEGMENT_RE.is_match(url)
        || url.contains("/pw/")
        || IMAGE_EXT_RE.is_match(url);

    valid_host && comic_shape
}

/// Deduplication key for a page URL. Tracking-parameter variants of the same
/// asset must collapse to one key: the lower-cased image filename when the
/// path ends in one, otherwise the path with query/fragment stripped.
pub fn normalize_page_url(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        let path = parsed.path();
        if let Some(cap) = FILENAME_KEY_RE.captures(path) {
            return cap[1].to_lowercase();
        }
        return path.to_string();
    }

    // Unparseable input, fall back to raw string handling
    if let Some(cap) = FILENAME_KEY_RE.captures(url) {
        return cap[1].to_lowercase();
    }
    url.split(['?', '#']).next().unwrap_or(url).to_string()
}

/// The numeric page code encoded in the image filename, when present.
/// This is the authoritative page order; DOM order is only a fallback.
pub fn page_sort_code(url: &str) -> Option<u64> {
    PAGE_CODE_RE
        .captures(url)
        .and_then(|cap| cap[1].parse().ok())
}

/// Resolve a site-relative href against the site base URL.
pub fn resolve_site_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", BASE_URL, href)
    }
}

/// Absolutize an image `src`: protocol-relative sources get an https scheme.
pub fn absolutize_image_src(src: &str) -> String {
    if src.starts_with("http") {
        src.to_string()
    } else {
        format!("https:{}", src)
    }
}

/// Series id derived from the final path segment of the source URL.
pub fn series_id_from_url(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hosted_numeric_filenames() {
        assert!(is_valid_comic_page(
            "https://2.bp.blogspot.com/pw/RCO001.jpg"
        ));
        assert!(is_valid_comic_page(
            "https://blogger.com/img/s1600/page.webp"
        ));
    }

    #[test]
    fn rejects_denylisted_urls() {
        // matches the extension pattern but carries a denylisted substring
        assert!(!is_valid_comic_page("https://2.bp.blogspot.com/logo.png"));
        assert!(!is_valid_comic_page(
            "https://mgid.com.blogspot.com/RCO001.jpg"
        ));
    }

    #[test]
    fn rejects_unknown_hosts() {
        assert!(!is_valid_comic_page("https://example.com/RCO001.jpg"));
    }

    #[test]
    fn normalization_collapses_tracking_variants() {
        let a = normalize_page_url("https://host.blogspot.com/path/RCO001.jpg?auto=webp");
        let b = normalize_page_url("https://host.blogspot.com/path/RCO001.jpg?q=2");
        assert_eq!(a, b);
        assert_eq!(a, "rco001.jpg");
    }

    #[test]
    fn normalization_without_filename_uses_path() {
        let key = normalize_page_url("https://host.blogspot.com/pw/abcdef?x=1#frag");
        assert_eq!(key, "/pw/abcdef");
    }

    #[test]
    fn normalization_is_idempotent_over_candidates() {
        let candidates = [
            "https://host.blogspot.com/RCO001.jpg?auto=webp",
            "https://host.blogspot.com/RCO001.jpg?q=2",
            "https://host.blogspot.com/RCO002.jpg",
        ];
        let pass = |input: &[&str]| -> Vec<String> {
            let mut seen = std::collections::HashSet::new();
            input
                .iter()
                .filter(|u| is_valid_comic_page(u))
                .filter(|u| seen.insert(normalize_page_url(u)))
                .map(|u| u.to_string())
                .collect()
        };
        let once = pass(&candidates);
        let twice: Vec<String> = {
            let refs: Vec<&str> = once.iter().map(String::as_str).collect();
            pass(&refs)
        };
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn page_codes() {
        assert_eq!(
            page_sort_code("https://h.blogspot.com/RCO012.jpg"),
            Some(12)
        );
        assert_eq!(page_sort_code("https://h.blogspot.com/cover.jpg"), None);
    }

    #[test]
    fn series_ids() {
        assert_eq!(
            series_id_from_url("https://readcomiconline.li/Comic/Spider-Man"),
            "Spider-Man"
        );
        assert_eq!(
            series_id_from_url("https://readcomiconline.li/Comic/Spider-Man/"),
            "unknown"
        );
    }

    #[test]
    fn url_resolution() {
        assert_eq!(
            resolve_site_url("/Comic/Batman"),
            "https://readcomiconline.li/Comic/Batman"
        );
        assert_eq!(resolve_site_url("https://x.test/a"), "https://x.test/a");
        assert_eq!(
            absolutize_image_src("//2.bp.blogspot.com/RCO001.jpg"),
            "https://2.bp.blogspot.com/RCO001.jpg"
        );
    }
}
