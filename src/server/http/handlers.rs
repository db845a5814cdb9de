//! HTTP request handlers
//!
//! Handlers only read shared state. The rotation lock is released before the
//! catalog query runs.

use std::sync::Arc;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;
use crate::catalog::{CatalogAccessor, ImageRecord};
use crate::slideshow::RotationState;
use crate::weather::{WeatherCache, WeatherSnapshot};
use super::templates::Templates;

const NO_IMAGES: &str = "No images available";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub rotation: Arc<RotationState>,
    pub weather: Arc<WeatherCache>,
    pub catalog: Arc<dyn CatalogAccessor>,
    pub templates: Arc<Templates>,
}

type HandlerError = (StatusCode, &'static str);

/// Slideshow diagnostics
#[derive(Serialize, Debug, Clone)]
pub struct SlideshowStatus {
    pub indices: Vec<i64>,
    pub count: usize,
    pub current: Option<i64>,
    /// 1-based
    pub position: Option<usize>,
}

async fn current_record(state: &AppState) -> Result<ImageRecord, HandlerError> {
    let Some(idx) = state.rotation.current_index() else {
        tracing::warn!("No images available in catalog");
        return Err((StatusCode::INTERNAL_SERVER_ERROR, NO_IMAGES));
    };

    state.catalog.get_record(idx).await.map_err(|e| {
        tracing::error!("Error getting image {} from catalog: {}", idx, e);
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    })
}

/// Frame page
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    if let Some(current) = state.rotation.current() {
        tracing::debug!(
            "current_idx: {}, slide_position: {} of {}",
            current.index,
            current.position,
            current.len
        );
    }

    let image = current_record(&state).await?;
    let weather = state.weather.read();

    state
        .templates
        .render_index(&image, &weather)
        .map(Html)
        .map_err(|e| {
            tracing::error!("Error executing template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        })
}

/// Current image metadata as JSON
pub async fn current_image(
    State(state): State<AppState>,
) -> Result<Json<ImageRecord>, HandlerError> {
    current_record(&state).await.map(Json)
}

/// Cached weather snapshot as JSON
pub async fn weather(State(state): State<AppState>) -> Json<WeatherSnapshot> {
    Json(state.weather.read())
}

/// Slideshow diagnostics as JSON
pub async fn slideshow(State(state): State<AppState>) -> Json<SlideshowStatus> {
    let (indices, count) = state.rotation.snapshot_lists();
    let current = state.rotation.current();
    Json(SlideshowStatus {
        indices,
        count,
        current: current.map(|c| c.index),
        position: current.map(|c| c.position),
    })
}

/// Liveness check
pub async fn hello_world() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], "Hello World").into_response()
}
