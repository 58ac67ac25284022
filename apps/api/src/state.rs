use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. `None` when no API key is configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
}
