//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::problem::Page;
use crate::render::render_document;
use crate::state::AppState;

/// Pages from an earlier generate call. The service keeps nothing between requests.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub include_answer_key: bool,
}

/// POST /api/v1/worksheets/export
///
/// Renders the given pages and returns them as a file attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if request.pages.iter().all(|p| p.problems.is_empty()) {
        return Err(AppError::Validation(
            "No problems to export. Generate a worksheet first.".to_string(),
        ));
    }

    let document = render_document(&request.pages, &request.title, request.include_answer_key);
    let artifact = state.exporter.export(&document, &request.title).await?;
    info!(
        "Exported {} sheets as {} ({} bytes)",
        document.sheets.len(),
        artifact.filename,
        artifact.body.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    header_safe(&artifact.filename)
                ),
            ),
        ],
        artifact.body,
    )
        .into_response())
}

/// Header values only carry visible ASCII; everything else becomes `_`.
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe_replaces_non_ascii() {
        assert_eq!(
            header_safe("Mathe_Meister_Übung\"1\".txt"),
            "Mathe_Meister__bung_1_.txt"
        );
    }
}
