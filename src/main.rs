use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use comic_scraper::browser_client::ChromeRenderer;
use comic_scraper::config::Config;
use comic_scraper::crawler::{self, ScrapeOptions};
use comic_scraper::http_client::HttpClient;
use comic_scraper::models::ScrapedData;
use comic_scraper::{search, storage};

/// Scrape a comic series into a JSON record
#[derive(Parser, Debug)]
#[command(name = "comic-scraper")]
struct Cli {
    /// Series URL, e.g. https://readcomiconline.li/Comic/Spider-Man
    url: Option<String>,

    /// Limit the number of chapters scraped (most recent first)
    #[arg(long)]
    max_chapters: Option<usize>,

    /// Output path for the scraped record
    #[arg(long)]
    output: Option<PathBuf>,

    /// Search for a series instead of scraping
    #[arg(long, conflicts_with_all = ["url", "max_chapters", "output"])]
    search: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = Config::load();
    let http = match HttpClient::with_config(config.scrape.http_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(query) = cli.search {
        run_search(&http, &query).await;
        return;
    }

    let Some(url) = cli.url else {
        eprintln!("Error: a series URL is required (or use --search)");
        std::process::exit(1);
    };
    if !url.starts_with("http") {
        eprintln!("Error: the URL must start with http:// or https://");
        std::process::exit(1);
    }

    let output = cli
        .output
        .unwrap_or_else(|| Path::new(&config.data_dir).join("comic.json"));
    let options = ScrapeOptions {
        max_chapters: cli.max_chapters,
        delay_between_chapters_ms: config.scrape.delay_between_chapters_ms,
        delay_between_pages_ms: config.scrape.delay_between_pages_ms,
    };
    let renderer = ChromeRenderer::with_config(config.scrape.browser_config());

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("interrupt received, stopping the scrape");
                cancel.cancel();
            }
        });
    }

    println!("Scraping: {}", url);
    if let Some(max) = cli.max_chapters {
        println!("Chapter limit: {}", max);
    }

    match crawler::scrape_full_series(&http, &renderer, &url, &options, &cancel).await {
        Ok(series) => {
            let data = ScrapedData {
                series,
                scraped_at: Utc::now(),
                source: url,
            };
            if let Err(e) = storage::save_scraped_data(&output, &data) {
                eprintln!("Failed to write {}: {}", output.display(), e);
                std::process::exit(1);
            }
            let total_pages: usize = data.series.chapters.iter().map(|c| c.page_count).sum();
            println!("Scrape complete:");
            println!("  title:    {}", data.series.title);
            println!("  chapters: {}", data.series.total_chapters);
            println!("  pages:    {}", total_pages);
            println!("  output:   {}", output.display());
        }
        Err(e) => {
            eprintln!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_search(http: &HttpClient, query: &str) {
    match search::search_comics(http, query).await {
        Ok(results) if results.is_empty() => {
            println!("No results found.");
        }
        Ok(results) => {
            println!("Results ({}):\n", results.len());
            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   {}\n", result.url);
            }
        }
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
