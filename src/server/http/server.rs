//! HTTP server setup and management

use std::path::Path;
use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use super::handlers::{current_image, hello_world, home, slideshow, weather, AppState};

/// URL prefix the image directory is mounted under
pub const STATIC_PREFIX: &str = "/static";

/// Build the frame router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/helloworld", get(hello_world))
        .route("/api/current-image", get(current_image))
        .route("/api/weather", get(weather))
        .route("/api/slideshow", get(slideshow))
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `cancel` fires, then drain in-flight requests
pub async fn serve(listener: TcpListener, app: Router, cancel: CancellationToken) -> crate::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;
    Ok(())
}
