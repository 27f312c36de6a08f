use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single page image of a chapter. Numbered 1-based and contiguous;
/// created exclusively by the page extractor and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicPage {
    pub page_number: u32,
    pub image_url: String,
}

/// One issue of a series. `pages` stays empty until the crawler fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicChapter {
    pub id: String,
    pub title: String,
    pub url: String,
    pub pages: Vec<ComicPage>,
    pub page_count: usize,
}

/// A comic series with metadata and its chapter list, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicSeries {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub url: String,
    pub chapters: Vec<ComicChapter>,
    pub total_chapters: usize,
}

/// The persisted unit: one immutable snapshot per series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    pub series: ComicSeries,
    pub scraped_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

/// Listing entry served by the read-side API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_chapters: usize,
    #[serde(default)]
    pub genres: Vec<String>,
    pub filename: String,
}
