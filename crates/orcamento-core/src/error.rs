use thiserror::Error;

/// Reasons a submitted quote form is rejected.
///
/// `Display` is the message shown to the user, in Portuguese.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    MissingRequiredField(&'static str),

    #[error("O valor total deve ser um número válido.")]
    InvalidNumber,

    #[error("O valor total deve ser maior que zero.")]
    NonPositiveTotal,

    #[error("Por favor, insira um CPF (11 dígitos) ou CNPJ (14 dígitos) válido.")]
    InvalidTaxId,
}

impl ValidationError {
    /// Short machine-readable tag, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField(_) => "missing_required_field",
            ValidationError::InvalidNumber => "invalid_number",
            ValidationError::NonPositiveTotal => "non_positive_total",
            ValidationError::InvalidTaxId => "invalid_tax_id",
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing required field: {0}")]
    MissingField(String),
}
