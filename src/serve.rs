use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use tokio::task;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::core::{booklet, composite, lookup, roots};

const CACHE_MAX_AGE_SECS: i64 = 30 * 24 * 3600;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

#[derive(Deserialize)]
pub struct CoverQuery {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    dir: String,
    #[serde(default)]
    no: String,
}

impl CoverQuery {
    /// Booklet page number; anything non-numeric behaves like the default 0,
    /// which names a page that never exists.
    fn page_no(&self) -> u32 {
        self.no.parse().unwrap_or(0)
    }
}

/// Per-request resolution outcome, computed on the blocking pool.
enum Outcome {
    Image(Bytes),
    BookletCount(u32),
    NotFound,
}

pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/coverart", get(get_coverart))
        .with_state(AppState { config })
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn get_coverart(
    State(state): State<AppState>,
    Query(query): Query<CoverQuery>,
) -> Result<Response, StatusCode> {
    let start = Instant::now();
    let config = state.config.clone();
    let kind = query.kind.clone();
    let dir = query.dir.clone();

    let outcome = task::spawn_blocking(move || resolve(&config, &query))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match outcome {
        Outcome::Image(bytes) => {
            info!(
                "cover served type={} dir={} bytes={} ms={}",
                kind,
                dir,
                bytes.len(),
                start.elapsed().as_millis()
            );
            Ok(image_response(bytes))
        }
        Outcome::BookletCount(count) => {
            info!(
                "booklet counted dir={} count={} ms={}",
                dir,
                count,
                start.elapsed().as_millis()
            );
            Ok(Json(json!({ "booklet_num": count })).into_response())
        }
        Outcome::NotFound => {
            info!(
                "cover miss type={} dir={} ms={}",
                kind,
                dir,
                start.elapsed().as_millis()
            );
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn resolve(config: &Config, query: &CoverQuery) -> Outcome {
    let Some(root) = roots::effective_root(config) else {
        return Outcome::NotFound;
    };
    let dir = root.join(&query.dir);

    match query.kind.as_str() {
        "artist" => resolve_artist(config, &dir),
        "album" => match lookup::find_image(&dir, &config.images.album) {
            Some(path) => read_image(&path),
            None => Outcome::NotFound,
        },
        "booklet_num" => Outcome::BookletCount(booklet::count_pages(&dir)),
        "album_booklet" => read_image(&booklet::page_path(&dir, query.page_no())),
        _ => Outcome::NotFound,
    }
}

/// Artist lookup with composite fallback. When no configured artist image
/// exists, a 2x2 grid of album covers from the immediate subdirectories is
/// built and persisted as `thumb.jpg`; the written file doubles as the cache
/// for later requests, which hit the plain lookup path.
fn resolve_artist(config: &Config, dir: &Path) -> Outcome {
    if let Some(path) = lookup::find_image(dir, &config.images.artist) {
        return read_image(&path);
    }

    let covers = lookup::collect_album_covers(dir, &config.images.album, 4);
    let thumb = dir.join("thumb.jpg");
    if let Err(err) = composite::build_artist_thumb(&covers, &thumb) {
        info!("composite failed dir={} err={}", dir.display(), err);
        return Outcome::NotFound;
    }

    match lookup::find_image(dir, &config.images.artist) {
        Some(path) => read_image(&path),
        // thumb.jpg is not among the configured candidates; serve it directly.
        None => read_image(&thumb),
    }
}

/// Read the resolved file. A file deleted between resolution and read is a
/// plain miss, never a server error.
fn read_image(path: &Path) -> Outcome {
    match fs::read(path) {
        Ok(bytes) => Outcome::Image(Bytes::from(bytes)),
        Err(_) => Outcome::NotFound,
    }
}

fn image_response(bytes: Bytes) -> Response {
    // Last-Modified is deliberately the time of the response, not the file
    // mtime; downstream caches revalidate against the 30-day window only.
    let now = Utc::now();
    let expires = now + Duration::seconds(CACHE_MAX_AGE_SECS);
    let fmt = "%a, %d %b %Y %H:%M:%S GMT";
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (
                header::CACHE_CONTROL,
                format!("max-age={}, public", CACHE_MAX_AGE_SECS),
            ),
            (header::EXPIRES, expires.format(fmt).to_string()),
            (header::LAST_MODIFIED, now.format(fmt).to_string()),
        ],
        bytes,
    )
        .into_response()
}
