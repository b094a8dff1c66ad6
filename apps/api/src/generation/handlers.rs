//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::catalog::{Category, CATALOG};
use crate::errors::AppError;
use crate::generation::worksheet::{run_worksheet, WorksheetRequest, WorksheetResponse};
use crate::state::AppState;

/// GET /api/v1/categories
///
/// The static category catalog, in display order.
pub async fn handle_list_categories() -> Json<&'static [Category]> {
    Json(CATALOG)
}

/// POST /api/v1/worksheets/generate
///
/// Full run: validate → assemble pages → answer key → rendered sheets.
/// Assembly is CPU-bound, so it runs on the blocking pool.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<WorksheetRequest>,
) -> Result<Json<WorksheetResponse>, AppError> {
    let config = state.config.clone();
    let response = tokio::task::spawn_blocking(move || run_worksheet(request, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Generation task failed: {e}")))??;

    Ok(Json(response))
}
