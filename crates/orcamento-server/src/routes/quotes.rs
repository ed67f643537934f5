use axum::extract::State;
use axum::response::Response;
use axum::Json;

use orcamento_core::form::QuoteForm;

use crate::error::ApiError;
use crate::routes::{pdf_attachment, render, today};
use crate::state::AppState;

/// JSON in, PDF out. Runs the same validation as the HTML form.
pub async fn generate_quote(
    State(state): State<AppState>,
    Json(form): Json<QuoteForm>,
) -> Result<Response, ApiError> {
    let quote = form.validate(today())?;
    let bytes = render(state.json_renderer.clone(), quote).await??;
    Ok(pdf_attachment(bytes, "orcamento.pdf"))
}
