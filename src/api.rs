//! Read-side HTTP API over the persisted records directory.
//!
//! Pure reads, no scraping: a listing endpoint and a by-id lookup. Unknown
//! ids map to 404; unexpected read failures map to a generic 500 without
//! leaking internal detail.

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;
use std::path::PathBuf;

use crate::storage;

pub struct ApiState {
    pub data_dir: PathBuf,
}

#[get("/api/comics")]
pub async fn list_comics(state: web::Data<ApiState>) -> impl Responder {
    match storage::list_comics(&state.data_dir) {
        Ok(comics) => HttpResponse::Ok().json(json!({ "comics": comics })),
        Err(e) => {
            log::error!("failed to list comics: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Server error" }))
        }
    }
}

#[get("/api/comics/{id}")]
pub async fn get_comic(state: web::Data<ApiState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match storage::find_comic_by_id(&state.data_dir, &id) {
        Ok(Some(comic)) => HttpResponse::Ok().json(json!({ "comic": comic })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Comic not found" })),
        Err(e) => {
            log::error!("failed to load comic {}: {}", id, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Server error" }))
        }
    }
}
