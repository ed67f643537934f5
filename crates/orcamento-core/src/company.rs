use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The issuing company's letterhead, printed on every quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    /// CNPJ, already formatted for display.
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// PIX key shown in the payment footer.
    pub payment_key: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Prestadora de Serviços Ltda".to_string(),
            tax_id: "00.000.000/0001-00".to_string(),
            address: "Rua Exemplo, 100 - Centro - São Paulo/SP".to_string(),
            phone: "(11) 90000-0000".to_string(),
            email: "contato@prestadora.com.br".to_string(),
            payment_key: "contato@prestadora.com.br".to_string(),
        }
    }
}

impl CompanyProfile {
    pub fn from_json(contents: &str) -> Result<Self, CoreError> {
        let profile: CompanyProfile = serde_json::from_str(contents)?;
        if profile.name.trim().is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
