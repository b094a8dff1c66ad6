pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/categories", get(handlers::handle_list_categories))
        // Worksheets
        .route(
            "/api/v1/worksheets/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/worksheets/export",
            post(export_handlers::handle_export),
        )
        .with_state(state)
}
