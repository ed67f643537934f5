use axum::extract::State;
use axum::response::{Html, Response};
use axum::Form;

use orcamento_core::form::QuoteForm;
use orcamento_export::render::render_form_page;

use crate::error::FormError;
use crate::routes::{pdf_attachment, render, today};
use crate::state::AppState;

pub async fn show_form() -> Result<Html<String>, FormError> {
    Ok(Html(render_form_page()?))
}

/// Validate the submitted form and send the quote PDF as a download named
/// `orcamento_{client}_{dd-mm-yyyy}.pdf`.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<QuoteForm>,
) -> Result<Response, FormError> {
    let quote = form.validate(today())?;
    let filename = format!("orcamento_{}_{}.pdf", quote.client_name, quote.file_date());

    let bytes = render(state.form_renderer.clone(), quote).await??;
    Ok(pdf_attachment(bytes, &filename))
}
