//! Payment amounts derived from a quote's total.

use rust_decimal::{Decimal, RoundingStrategy};

/// Card payments carry a fixed 5% processing surcharge.
pub const CARD_SURCHARGE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Amount due when paying in cash: the total itself, at cent precision.
pub fn cash_amount(total: Decimal) -> Decimal {
    to_cents(total)
}

/// Amount due when paying by card: `total × 1.05`, at cent precision.
///
/// Returns `None` when the multiplication would overflow.
pub fn checked_card_amount(total: Decimal) -> Option<Decimal> {
    total
        .checked_mul(Decimal::ONE + CARD_SURCHARGE)
        .map(to_cents)
}

/// Saturates at `Decimal::MAX`; a validated quote never gets there.
pub fn card_amount(total: Decimal) -> Decimal {
    checked_card_amount(total).unwrap_or(Decimal::MAX)
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `1050.00`. Two decimals, `.` separator, no grouping.
pub fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", to_cents(amount))
}

/// `R$ 1.050,00`. Brazilian grouping with `.` thousands and `,` decimals.
pub fn format_brl(amount: Decimal) -> String {
    let cents = to_cents(amount);
    let plain = format_plain(cents.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}
