//! Derived quote values: exchange rate, output amount and the amount filter.

use crate::models::PriceTable;

/// Price of `source` expressed in units of `target`.
///
/// `None` is the "no rate" state: a side is unselected, a price is unknown,
/// or the quotient is zero or not finite.
pub fn exchange_rate(
    table: &PriceTable,
    source: Option<&str>,
    target: Option<&str>,
) -> Option<f64> {
    let source_price = table.price(source?)?;
    let target_price = table.price(target?)?;
    let rate = source_price / target_price;
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

/// Parses the amount field. Empty and malformed text yield `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Output amount with six decimals, or an empty string when it cannot be
/// computed.
pub fn target_amount(amount_text: &str, rate: Option<f64>) -> String {
    match (parse_amount(amount_text), rate) {
        (Some(amount), Some(rate)) => format!("{:.6}", amount * rate),
        _ => String::new(),
    }
}

/// Accepts digits with at most one decimal point; the empty string passes.
pub fn is_amount_input(text: &str) -> bool {
    let mut seen_dot = false;
    text.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// The line shown under the form describing the current rate.
pub fn rate_line(source: Option<&str>, target: Option<&str>, rate: Option<f64>) -> String {
    match (source, target, rate) {
        (Some(s), Some(t), Some(r)) => format!("1 {s} ≈ {r:.6} {t}"),
        _ => "No exchange rate available".to_string(),
    }
}
