//! Persistence of scraped records and the read-side lookups over them.
//!
//! One JSON document per series in the data directory. Records are written
//! once and thereafter read-only; lookups scan the directory rather than
//! keeping an index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;
use crate::models::{ComicSeries, ComicSummary, ScrapedData};

/// Write a scraped record as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_scraped_data(path: &Path, data: &ScrapedData) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    log::info!("saved scraped record to {}", path.display());
    Ok(())
}

/// All record files in the data directory, sorted by filename. A missing
/// directory is an empty collection, not an error.
pub fn list_record_files(data_dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let entries = match fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

/// Load one record, skipping (with a warning) anything unreadable or
/// malformed rather than failing the whole listing.
pub fn load_record(path: &Path) -> Option<ScrapedData> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("could not read record {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("skipping malformed record {}: {}", path.display(), e);
            None
        }
    }
}

/// Summaries of every readable record in the data directory.
pub fn list_comics(data_dir: &Path) -> Result<Vec<ComicSummary>, io::Error> {
    let files = list_record_files(data_dir)?;

    let summaries = files
        .iter()
        .filter_map(|path| {
            let data = load_record(path)?;
            let filename = path.file_name()?.to_string_lossy().into_owned();
            Some(ComicSummary {
                id: data.series.id,
                title: data.series.title,
                cover_image: data.series.cover_image,
                description: data.series.description,
                total_chapters: data.series.total_chapters,
                genres: data.series.genres,
                filename,
            })
        })
        .collect();

    Ok(summaries)
}

/// Scan records until one matches `series.id`. Not indexed.
pub fn find_comic_by_id(data_dir: &Path, id: &str) -> Result<Option<ComicSeries>, io::Error> {
    for path in list_record_files(data_dir)? {
        if let Some(data) = load_record(&path) {
            if data.series.id == id {
                return Ok(Some(data.series));
            }
        }
    }
    Ok(None)
}
