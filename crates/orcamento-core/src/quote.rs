use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::payment;
use crate::tax_id::TaxId;

/// A validated client quote. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub client_name: String,
    pub tax_id: Option<TaxId>,
    pub description: String,
    pub notes: Option<String>,
    pub total: Decimal,
    pub issued_on: Date,
}

/// One column of the payment-options table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOption {
    pub label: &'static str,
    pub terms: &'static str,
    pub amount: Decimal,
}

impl Quote {
    pub fn cash_amount(&self) -> Decimal {
        payment::cash_amount(self.total)
    }

    pub fn card_amount(&self) -> Decimal {
        payment::card_amount(self.total)
    }

    /// Cash, 50/50 split and card installments. Every option lists the
    /// quoted total as-is.
    pub fn payment_options(&self) -> [PaymentOption; 3] {
        let amount = payment::cash_amount(self.total);
        [
            PaymentOption {
                label: "À vista",
                terms: "Pagamento integral na aprovação",
                amount,
            },
            PaymentOption {
                label: "50% + 50%",
                terms: "Metade na aprovação, metade na entrega",
                amount,
            },
            PaymentOption {
                label: "Cartão de crédito",
                terms: "Parcelado conforme a operadora",
                amount,
            },
        ]
    }

    /// `dd/mm/yyyy`
    pub fn issued_on_display(&self) -> String {
        self.issued_on.strftime("%d/%m/%Y").to_string()
    }

    /// `dd-mm-yyyy`, safe for file names.
    pub fn file_date(&self) -> String {
        self.issued_on.strftime("%d-%m-%Y").to_string()
    }
}
