//! orcamento-core
//!
//! Pure domain types for client quotes: form validation, payment amounts
//! and the company letterhead. No HTTP or PDF dependency.

pub mod company;
pub mod error;
pub mod form;
pub mod payment;
pub mod quote;
pub mod tax_id;
