use std::collections::BTreeMap;
use std::path::PathBuf;

use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use uuid::Uuid;

use orcamento_core::company::CompanyProfile;
use orcamento_core::quote::Quote;

use crate::error::ExportError;
use crate::render::render_quote_html;

/// Convert an HTML document to PDF bytes.
pub fn html_to_pdf(html: &str) -> Result<Vec<u8>, ExportError> {
    let images = BTreeMap::new();
    let fonts = BTreeMap::new();
    let mut warnings = Vec::new();

    let doc = PdfDocument::from_html(
        html,
        &images,
        &fonts,
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut save_warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut save_warnings);

    if !warnings.is_empty() || !save_warnings.is_empty() {
        tracing::debug!(
            layout_warnings = warnings.len(),
            save_warnings = save_warnings.len(),
            "html to pdf conversion produced warnings"
        );
    }

    Ok(bytes)
}

/// Renders the HTML template, converts it to PDF and streams it back from
/// a file in `output_dir`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    company: CompanyProfile,
    output_dir: PathBuf,
    keep_files: bool,
}

impl TemplateRenderer {
    pub fn new(company: CompanyProfile, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            company,
            output_dir: output_dir.into(),
            keep_files: false,
        }
    }

    /// Leave written PDFs in `output_dir` instead of removing them.
    pub fn keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }

    pub fn render_quote(&self, quote: &Quote) -> Result<Vec<u8>, ExportError> {
        let html = render_quote_html(quote, &self.company)?;
        let pdf = html_to_pdf(&html)?;

        // Named per request, never after the client.
        let path = self.output_dir.join(format!("orcamento_{}.pdf", Uuid::new_v4()));
        std::fs::write(&path, &pdf)?;
        let bytes = std::fs::read(&path)?;

        if self.keep_files {
            tracing::info!(path = %path.display(), "quote pdf kept");
        } else if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove quote pdf");
        }

        Ok(bytes)
    }
}
