use comic_scraper::series::parse_series;

const SERIES_URL: &str = "https://readcomiconline.li/Comic/Spider-Man";

fn series_fixture() -> String {
    r#"<html>
<head><title>Spider-Man comic | Read Spider-Man comic online in high quality</title></head>
<body>
  <a href="/Comic/Spider-Man">Spider-Man</a>
  <div>
    <span>Cover</span>
    <img src="/Uploads/Etc/covers/spider-man.jpg">
  </div>
  <p>Genres:
    <a href="/Genre/Action">Action</a>
    <a href="/Genre/Adventure">Adventure</a>
    <a href="/Genre/Action">Action</a>
  </p>
  <p>Writer: <a href="/Writer/Stan-Lee">Stan Lee</a></p>
  <p>Publisher: <a href="/Publisher/Marvel">Marvel</a></p>
  <p>Status: Completed (no further issues planned)</p>
  <p>Summary: When a radioactive spider bites a teenager, an ordinary student
     becomes something else entirely and must learn what power and
     responsibility really mean across New York City.</p>
  <table class="listing">
    <tbody>
      <tr><th>Issue</th><th>Added</th></tr>
      <tr><td><a href="/Comic/Spider-Man/Issue-1?id=1">Issue-1</a></td><td>1/1/2020</td></tr>
      <tr><td><a href="/Comic/Spider-Man/Issue-2?id=2">Issue-2</a></td><td>2/1/2020</td></tr>
      <tr><td><a href="/Comic/Spider-Man/Issue-3?id=3">Issue-3</a></td><td>3/1/2020</td></tr>
    </tbody>
  </table>
</body>
</html>"#
        .to_string()
}

#[test]
fn extracts_core_metadata() {
    let series = parse_series(&series_fixture(), SERIES_URL);

    assert_eq!(series.id, "Spider-Man");
    assert_eq!(series.title, "Spider-Man");
    assert_eq!(series.author.as_deref(), Some("Stan Lee"));
    assert_eq!(series.publisher.as_deref(), Some("Marvel"));
    assert_eq!(series.status.as_deref(), Some("Completed"));
    assert_eq!(series.url, SERIES_URL);
}

#[test]
fn description_comes_from_keyword_paragraph() {
    let series = parse_series(&series_fixture(), SERIES_URL);
    let description = series.description.expect("description should be extracted");
    assert!(description.contains("radioactive spider"));
    assert!(!description.to_lowercase().starts_with("summary:"));
}

#[test]
fn cover_is_found_via_labeled_section_and_resolved() {
    let series = parse_series(&series_fixture(), SERIES_URL);
    assert_eq!(
        series.cover_image.as_deref(),
        Some("https://readcomiconline.li/Uploads/Etc/covers/spider-man.jpg")
    );
}

#[test]
fn genres_are_deduplicated_in_order() {
    let series = parse_series(&series_fixture(), SERIES_URL);
    assert_eq!(series.genres, vec!["Action", "Adventure"]);
}

#[test]
fn chapters_read_most_recent_first() {
    let series = parse_series(&series_fixture(), SERIES_URL);

    let titles: Vec<&str> = series.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Issue-3", "Issue-2", "Issue-1"]);
    assert_eq!(series.total_chapters, 3);

    // ids were assigned in extraction (oldest-first) order
    assert_eq!(series.chapters[0].id, "chapter-3");
    assert_eq!(series.chapters[2].id, "chapter-1");

    assert_eq!(
        series.chapters[0].url,
        "https://readcomiconline.li/Comic/Spider-Man/Issue-3?id=3"
    );
    assert!(series.chapters.iter().all(|c| c.pages.is_empty()));
    assert!(series.chapters.iter().all(|c| c.page_count == 0));
}

#[test]
fn header_rows_are_skipped() {
    let series = parse_series(&series_fixture(), SERIES_URL);
    assert!(series.chapters.iter().all(|c| c.title.starts_with("Issue-")));
}

#[test]
fn loose_selector_recovers_chapters_without_listing_table() {
    let html = r#"<html><body>
      <table><tbody>
        <tr><td><a href="/Comic/X/Issue-1?id=9">Issue-1</a></td></tr>
        <tr><td><a href="/Comic/X/Issue-2?id=10">Issue-2</a></td></tr>
      </tbody></table>
    </body></html>"#;
    let series = parse_series(html, "https://readcomiconline.li/Comic/X");
    let titles: Vec<&str> = series.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Issue-2", "Issue-1"]);
}

#[test]
fn summary_label_paragraph_is_a_fallback() {
    let html = r#"<html><body>
      <p>Summary: A short-enough tale of masked vigilantes patrolling the docks
         of a rain-soaked city, night after night.</p>
    </body></html>"#;
    let series = parse_series(html, "https://readcomiconline.li/Comic/X");
    let description = series.description.expect("summary paragraph should be used");
    assert!(description.starts_with("A short-enough tale"));
}
