//! Export: pluggable, trait-based backend that turns a rendered document into a download.
//!
//! Default: `TextExporter` (plain text, form-feed page breaks).
//! `DisabledExporter` is installed when `EXPORT_ENABLED=false`; it reports the backend as
//! unavailable so callers can retry later. Export never touches generation state.
//!
//! `AppState` holds an `Arc<dyn Exporter>`, swapped at startup via config.

pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;
use crate::render::{render_text, RenderedDocument};

const FILENAME_PREFIX: &str = "Mathe_Meister_";
const FALLBACK_STEM: &str = "Arbeitsblatt";

/// A finished file ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Implement this to add an output format without touching the handler.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(
        &self,
        document: &RenderedDocument,
        title: &str,
    ) -> Result<ExportArtifact, AppError>;
}

pub struct TextExporter;

#[async_trait]
impl Exporter for TextExporter {
    async fn export(
        &self,
        document: &RenderedDocument,
        title: &str,
    ) -> Result<ExportArtifact, AppError> {
        Ok(ExportArtifact {
            filename: export_filename(title, "txt"),
            content_type: "text/plain; charset=utf-8",
            body: Bytes::from(render_text(document)),
        })
    }
}

pub struct DisabledExporter;

#[async_trait]
impl Exporter for DisabledExporter {
    async fn export(
        &self,
        _document: &RenderedDocument,
        _title: &str,
    ) -> Result<ExportArtifact, AppError> {
        Err(AppError::ExportUnavailable(
            "The export backend is not available".to_string(),
        ))
    }
}

/// `Mathe_Meister_<title with whitespace runs as "_">.<extension>`, or a fixed stem for blank titles.
pub fn export_filename(title: &str, extension: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    };
    format!("{FILENAME_PREFIX}{stem}.{extension}")
}
