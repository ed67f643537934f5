use std::sync::LazyLock;

use serde::Serialize;
use tera::{Context, Tera};

use orcamento_core::company::CompanyProfile;
use orcamento_core::payment::format_plain;
use orcamento_core::quote::Quote;

use crate::error::ExportError;

/// The `.html` suffix turns on Tera's autoescaping for every variable.
const TEMPLATE_NAME: &str = "quote.html";
const TEMPLATE: &str = include_str!("../templates/quote.html");

const TAX_ID_MISSING: &str = "Não informado";
const NOTES_MISSING: &str = "Nenhuma observação fornecida.";

#[derive(Serialize)]
struct QuoteContext<'a> {
    pdf_mode: bool,
    empresa: &'a CompanyProfile,
    nome_cliente: &'a str,
    cpf_cnpj: String,
    descricao_servico: &'a str,
    observacoes: &'a str,
    valor_a_vista: String,
    valor_cartao: String,
    today: String,
}

/// Parsed once per process.
static ENGINE: LazyLock<Result<Tera, String>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| e.to_string())?;
    Ok(tera)
});

fn engine() -> Result<&'static Tera, ExportError> {
    ENGINE
        .as_ref()
        .map_err(|e| ExportError::TemplateParse(e.clone()))
}

/// Render the quote document as HTML, ready for PDF conversion.
///
/// User-supplied text is HTML-escaped on insertion.
pub fn render_quote_html(quote: &Quote, company: &CompanyProfile) -> Result<String, ExportError> {
    let context = QuoteContext {
        pdf_mode: true,
        empresa: company,
        nome_cliente: &quote.client_name,
        cpf_cnpj: quote
            .tax_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| TAX_ID_MISSING.to_string()),
        descricao_servico: &quote.description,
        observacoes: quote.notes.as_deref().unwrap_or(NOTES_MISSING),
        valor_a_vista: format_plain(quote.cash_amount()),
        valor_cartao: format_plain(quote.card_amount()),
        today: quote.issued_on_display(),
    };

    let value = serde_json::to_value(&context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(engine()?.render(TEMPLATE_NAME, &context)?)
}

/// Render the empty submission form.
pub fn render_form_page() -> Result<String, ExportError> {
    let mut context = Context::new();
    context.insert("pdf_mode", &false);
    Ok(engine()?.render(TEMPLATE_NAME, &context)?)
}
