use chrono::Utc;
use std::fs;

use comic_scraper::models::{ComicChapter, ComicPage, ComicSeries, ScrapedData};
use comic_scraper::storage::{find_comic_by_id, list_comics, save_scraped_data};

fn sample_record(id: &str, title: &str) -> ScrapedData {
    let url = format!("https://readcomiconline.li/Comic/{}", id);
    ScrapedData {
        series: ComicSeries {
            id: id.to_string(),
            title: title.to_string(),
            description: Some("A test series".to_string()),
            cover_image: None,
            author: None,
            publisher: None,
            genres: vec!["Action".to_string()],
            status: Some("Ongoing".to_string()),
            url: url.clone(),
            chapters: vec![ComicChapter {
                id: "chapter-1".to_string(),
                title: "Issue-1".to_string(),
                url: format!("{}/Issue-1", url),
                pages: vec![ComicPage {
                    page_number: 1,
                    image_url: "https://2.bp.blogspot.com/RCO001.jpg".to_string(),
                }],
                page_count: 1,
            }],
            total_chapters: 1,
        },
        scraped_at: Utc::now(),
        source: url,
    }
}

#[test]
fn save_creates_directories_and_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("batman.json");

    save_scraped_data(&path, &sample_record("Batman", "Batman")).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let loaded: ScrapedData = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded.series.id, "Batman");
    assert_eq!(loaded.series.chapters[0].pages[0].page_number, 1);

    // persisted shape uses the site's record field names
    assert!(content.contains("\"scrapedAt\""));
    assert!(content.contains("\"totalChapters\""));
    assert!(content.contains("\"pageNumber\""));
    assert!(content.contains("\"imageUrl\""));
}

#[test]
fn listing_summarizes_every_readable_record() {
    let dir = tempfile::tempdir().unwrap();
    save_scraped_data(
        &dir.path().join("batman.json"),
        &sample_record("Batman", "Batman"),
    )
    .unwrap();
    save_scraped_data(
        &dir.path().join("superman.json"),
        &sample_record("Superman", "Superman"),
    )
    .unwrap();
    // non-record files are ignored, malformed records are skipped
    fs::write(dir.path().join("notes.txt"), "not a record").unwrap();
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

    let comics = list_comics(dir.path()).unwrap();
    assert_eq!(comics.len(), 2);
    assert_eq!(comics[0].id, "Batman");
    assert_eq!(comics[0].filename, "batman.json");
    assert_eq!(comics[0].total_chapters, 1);
    assert_eq!(comics[1].id, "Superman");
}

#[test]
fn find_by_id_scans_until_match() {
    let dir = tempfile::tempdir().unwrap();
    save_scraped_data(
        &dir.path().join("batman.json"),
        &sample_record("Batman", "Batman"),
    )
    .unwrap();
    save_scraped_data(
        &dir.path().join("superman.json"),
        &sample_record("Superman", "Superman"),
    )
    .unwrap();

    let found = find_comic_by_id(dir.path(), "Superman").unwrap();
    assert_eq!(found.unwrap().title, "Superman");

    let missing = find_comic_by_id(dir.path(), "Shazam").unwrap();
    assert!(missing.is_none());
}

#[test]
fn missing_data_directory_is_empty_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let ghost = dir.path().join("does-not-exist");
    assert!(list_comics(&ghost).unwrap().is_empty());
    assert!(find_comic_by_id(&ghost, "Batman").unwrap().is_none());
}
