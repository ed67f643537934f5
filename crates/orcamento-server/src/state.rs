use std::sync::Arc;

use orcamento_export::layout::LayoutRenderer;
use orcamento_export::pdf::TemplateRenderer;
use orcamento_export::renderer::QuoteRenderer;

use crate::config::ServerConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    /// Used by the HTML form (`POST /`).
    pub form_renderer: Arc<QuoteRenderer>,
    /// Used by the JSON endpoint (`POST /gerar-orcamento`).
    pub json_renderer: Arc<QuoteRenderer>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        let template = TemplateRenderer::new(config.company.clone(), config.output_dir.clone())
            .keep_files(config.keep_pdfs);
        let layout = LayoutRenderer::new(config.company.clone());

        Self {
            form_renderer: Arc::new(template.into()),
            json_renderer: Arc::new(layout.into()),
        }
    }
}
