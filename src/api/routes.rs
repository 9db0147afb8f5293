use axum::{
    routing::get,
    Router,
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{ImagesQuery, ImageAnnotation};
use crate::api::response::{self, ImagesResponse};
use crate::extract::extract_image_urls;
use crate::AppState;

/// Upper bound on images sent to the vision model per request.
pub const MAX_DESCRIBED_IMAGES: usize = 2;

pub fn create_router(app_state: AppState) -> Router {
    let router = Router::new()
        .route("/images", get(images_handler))
        .route("/health", get(health_handler));

    let router = if app_state.config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health_handler() -> impl IntoResponse {
    response::health()
}

async fn images_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    // An undecodable query string is treated as one without a `url`
    let query = query
        .map(|Query(pairs)| ImagesQuery::from_pairs(pairs))
        .unwrap_or_default();
    let start_time = std::time::Instant::now();
    let result = process_images_request(&state, &query).await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(body) => {
            info!(images = body.len(), ?elapsed, "served /images");
            response::success(body).into_response()
        }
        Err(err) => {
            warn!(status = %err.status_code(), ?elapsed, "/images failed: {}", err);
            err.into_response()
        }
    }
}

/// Validate → scrape → extract → (describe) for a single request.
pub async fn process_images_request(state: &AppState, query: &ImagesQuery) -> Result<ImagesResponse> {
    let url = query
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingParameter("url"))?;

    info!("Processing request for URL: {}", url);
    let html = state.scraper.fetch_raw_html(url).await?;

    let images = extract_image_urls(&html);
    debug!(count = images.len(), "extracted image URLs from {}", url);

    if !state.config.describe_images {
        return Ok(ImagesResponse::Urls { images: images.into_vec() });
    }

    let mut described = Vec::with_capacity(MAX_DESCRIBED_IMAGES);
    for image in images.into_iter().take(MAX_DESCRIBED_IMAGES) {
        let description = state.vision.describe(&image).await;
        described.push(ImageAnnotation { url: image, description });
    }

    Ok(ImagesResponse::Described { images: described })
}
