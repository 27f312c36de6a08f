// Library interface for comic_scraper
// This allows tests and the binaries to use the scraper components

pub mod api;
pub mod browser_client;
pub mod config;
pub mod crawler;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod pages;
pub mod search;
pub mod series;
pub mod storage;
