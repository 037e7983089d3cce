use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::routing::get;
use axum::routing::post;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core;
use crate::routes;

/// Back end server: the JSON API under `/api` and the SPA assets for everything else.
/// Saved snapshots are not subject to a request body limit.
pub fn create_router(context: core::ArcContext) -> Router {
    Router::new()
        .route("/api/hello", get(routes::api::hello))
        .route("/api/sheet-data", get(routes::api::sheet_data))
        .route(
            "/api/save-data",
            post(routes::api::save_data).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/{*rest}", any(routes::api::not_found))
        .fallback(routes::assets::static_handler) // Serve static assets
        .with_state(context)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::very_permissive()),
        )
}
