use std::sync::Arc;

use crate::config::Config;
use crate::export::{DisabledExporter, Exporter, TextExporter};

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable: generation runs share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable export backend. Default: TextExporter. Disabled via EXPORT_ENABLED=false.
    pub exporter: Arc<dyn Exporter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let exporter: Arc<dyn Exporter> = if config.export_enabled {
            Arc::new(TextExporter)
        } else {
            Arc::new(DisabledExporter)
        };
        AppState { config, exporter }
    }
}
