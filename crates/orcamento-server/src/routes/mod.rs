pub mod form;
pub mod health;
pub mod quotes;

use std::sync::Arc;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use orcamento_core::quote::Quote;
use orcamento_export::error::ExportError;
use orcamento_export::renderer::QuoteRenderer;

/// Characters left as-is in an RFC 5987 `filename*` value.
const FILENAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_');

/// Today's date in the server's time zone.
pub(crate) fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

/// Render off the async runtime. PDF generation is CPU-bound and, for the
/// template renderer, touches the filesystem.
pub(crate) async fn render(
    renderer: Arc<QuoteRenderer>,
    quote: Quote,
) -> Result<Result<Vec<u8>, ExportError>, tokio::task::JoinError> {
    let kind = renderer.name();
    let started = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || renderer.render_quote(&quote)).await;
    if let Ok(Ok(bytes)) = &result {
        tracing::debug!(
            renderer = kind,
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quote rendered"
        );
    }
    result
}

/// A PDF download response.
pub(crate) fn pdf_attachment(bytes: Vec<u8>, filename: &str) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_filename(filename),
        utf8_percent_encode(filename, FILENAME_SAFE)
    );

    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Fallback `filename` for clients without RFC 5987 support.
fn ascii_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
