//! Euro amount formatting in Spanish locale conventions.
//!
//! Matches `Intl.NumberFormat('es-ES', { style: 'currency', currency: 'EUR' })`:
//! `.` groups thousands, `,` separates cents, the symbol trails after a
//! non-breaking space, and four-digit amounts are left ungrouped.

#[cfg(test)]
#[path = "currency_test.rs"]
mod currency_test;

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const SYMBOL_SEPARATOR: char = '\u{a0}';
const MIN_GROUPED_DIGITS: usize = 5;

/// Format `amount` as euros, rounded to cents. Non-finite input formats as zero.
#[must_use]
pub fn format_eur(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;

    let units = (cents / 100).to_string();
    let fraction = cents % 100;
    let sign = if negative { "-" } else { "" };

    format!(
        "{sign}{}{DECIMAL_SEPARATOR}{fraction:02}{SYMBOL_SEPARATOR}€",
        group_thousands(&units)
    )
}

fn group_thousands(digits: &str) -> String {
    if digits.len() < MIN_GROUPED_DIGITS {
        return digits.to_owned();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
