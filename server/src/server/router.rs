use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Nutrition ---
        .route("/api/nutrition/declaration", post(api::nutrition::compute_declaration))
        // --- QR codes ---
        .route("/api/labels/{id}/qr", post(api::qr::create_qr))
        .route("/api/labels/{id}/qr/{format}", get(api::qr::download_qr))
        // --- Middleware ---
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
