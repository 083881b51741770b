//! Axum router configuration with middleware.
//!
//! API routes live under `/api`. When the container has a frontend
//! directory, every other path is served from it, falling through to
//! `index.html` for client-side routing.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::controller;
use super::Container;

pub fn build_router(container: Arc<Container>) -> Router {
    let api_routes = Router::new()
        .route("/chat", post(controller::send_message))
        .route("/history", get(controller::get_history));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(controller::health_check));

    if let Some(web_dir) = container.web_dir() {
        let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
        router = router.fallback_service(serve_dir);
        info!("Serving frontend from {}", web_dir.display());
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}
