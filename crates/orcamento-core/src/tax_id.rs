use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

// ASCII classes only: Unicode `\d` also matches other scripts' digits.
static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid regex"));
static CPF_OR_CNPJ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{11}|[0-9]{14})$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxIdKind {
    /// Individual taxpayer registry, 11 digits.
    Cpf,
    /// Company registry, 14 digits.
    Cnpj,
}

/// A Brazilian tax identifier, stored as bare ASCII digits. Only built
/// through [`TaxId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxId {
    digits: String,
    kind: TaxIdKind,
}

impl TaxId {
    /// Strip punctuation and accept exactly 11 (CPF) or 14 (CNPJ) digits.
    ///
    /// Check digits are not verified.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits = NON_DIGIT.replace_all(raw, "").into_owned();
        if !CPF_OR_CNPJ.is_match(&digits) {
            return Err(ValidationError::InvalidTaxId);
        }
        let kind = if digits.chars().count() == 11 {
            TaxIdKind::Cpf
        } else {
            TaxIdKind::Cnpj
        };
        Ok(Self { digits, kind })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn kind(&self) -> TaxIdKind {
        self.kind
    }
}

impl fmt::Display for TaxId {
    /// `000.000.000-00` for CPF, `00.000.000/0000-00` for CNPJ.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.digits;
        match self.kind {
            TaxIdKind::Cpf => write!(f, "{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
            TaxIdKind::Cnpj => write!(
                f,
                "{}.{}.{}/{}-{}",
                &d[..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..]
            ),
        }
    }
}
