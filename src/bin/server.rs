use actix_web::{web, App, HttpServer};
use std::path::PathBuf;

use comic_scraper::api::{self, ApiState};
use comic_scraper::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::load();
    let state = web::Data::new(ApiState {
        data_dir: PathBuf::from(&config.data_dir),
    });

    log::info!("serving comics API on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api::list_comics)
            .service(api::get_comic)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
