use std::str::FromStr;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::payment;
use crate::quote::Quote;
use crate::tax_id::TaxId;

/// Raw quote fields as submitted, either url-encoded or JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteForm {
    #[serde(rename = "nomeCliente", default)]
    pub client_name: Option<String>,
    #[serde(rename = "cpfCnpjCliente", default)]
    pub tax_id: Option<String>,
    #[serde(rename = "descricaoServico", default)]
    pub description: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "valorTotal", default)]
    pub total: Option<RawAmount>,
}

/// JSON clients may send `valorTotal` as a number; forms always send text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(f64),
}

impl RawAmount {
    fn into_text(self) -> String {
        match self {
            RawAmount::Text(s) => s,
            RawAmount::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl QuoteForm {
    /// Check the submitted fields and build a [`Quote`] issued on `issued_on`.
    ///
    /// Checks run in order: required fields, total is numeric, total is
    /// positive, tax ID shape. The first failure is returned.
    pub fn validate(self, issued_on: Date) -> Result<Quote, ValidationError> {
        let client_name = non_blank(self.client_name)
            .ok_or(ValidationError::MissingRequiredField("nomeCliente"))?;
        let description = non_blank(self.description)
            .ok_or(ValidationError::MissingRequiredField("descricaoServico"))?;
        let raw_total = non_blank(self.total.map(RawAmount::into_text))
            .ok_or(ValidationError::MissingRequiredField("valorTotal"))?;

        let total = parse_total(&raw_total)?;

        let tax_id = non_blank(self.tax_id)
            .map(|raw| TaxId::parse(&raw))
            .transpose()?;

        Ok(Quote {
            client_name,
            tax_id,
            description,
            notes: non_blank(self.notes),
            total,
            issued_on,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts `1000`, `1000.50` and scientific notation such as `1e3`.
fn parse_total(raw: &str) -> Result<Decimal, ValidationError> {
    let total = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidNumber)?;

    if total <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveTotal);
    }
    if payment::checked_card_amount(total).is_none() {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(total)
}
