use orcamento_core::quote::Quote;

use crate::error::ExportError;
use crate::layout::LayoutRenderer;
use crate::pdf::TemplateRenderer;

/// One capability, two ways to produce the PDF.
#[derive(Debug, Clone)]
pub enum QuoteRenderer {
    /// HTML template converted to PDF, staged through a file on disk.
    Template(TemplateRenderer),
    /// Drawing operations assembled in memory.
    Layout(LayoutRenderer),
}

impl QuoteRenderer {
    pub fn render_quote(&self, quote: &Quote) -> Result<Vec<u8>, ExportError> {
        match self {
            QuoteRenderer::Template(renderer) => renderer.render_quote(quote),
            QuoteRenderer::Layout(renderer) => renderer.render_quote(quote),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuoteRenderer::Template(_) => "template",
            QuoteRenderer::Layout(_) => "layout",
        }
    }
}

impl From<TemplateRenderer> for QuoteRenderer {
    fn from(renderer: TemplateRenderer) -> Self {
        QuoteRenderer::Template(renderer)
    }
}

impl From<LayoutRenderer> for QuoteRenderer {
    fn from(renderer: LayoutRenderer) -> Self {
        QuoteRenderer::Layout(renderer)
    }
}
