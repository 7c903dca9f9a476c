//! Quantity and price normalization for Finnish receipt exports.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExtractionError;

/// Currency marker stripped from the end of price tokens.
const CURRENCY_MARKER: char = '€';

/// Units that are lowercased in display quantities.
const KNOWN_UNITS: [&str; 2] = ["kpl", "kg"];

/// Parse a receipt price (e.g. "1,95", "1,95 €" or "1.95").
pub fn parse_price(text: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = text.trim();
    let number = trimmed
        .strip_suffix(CURRENCY_MARKER)
        .unwrap_or(trimmed)
        .trim_end();

    parse_decimal(number).ok_or_else(|| ExtractionError::malformed("price", text))
}

/// Parse the numeric part of a quantity field (e.g. "0,512").
pub fn parse_quantity_number(text: &str) -> Result<Decimal, ExtractionError> {
    parse_decimal(text.trim()).ok_or_else(|| ExtractionError::malformed("quantity", text))
}

/// Parse an unsigned decimal with either comma or period as separator.
fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.replace(',', ".");

    let well_formed = normalized.chars().any(|c| c.is_ascii_digit())
        && normalized.chars().all(|c| c.is_ascii_digit() || c == '.')
        && normalized.matches('.').count() <= 1;
    if !well_formed {
        return None;
    }

    Decimal::from_str(&normalized).ok()
}

/// Normalize a quantity for display.
///
/// A bare `"1"` gets the default countable unit (`"1 kpl"`). Known unit
/// tokens are lowercased, everything else is kept as written.
pub fn format_quantity(text: &str) -> String {
    let text = text.trim();

    if text == "1" {
        return "1 kpl".to_string();
    }

    if !text.contains(char::is_whitespace) {
        return text.to_lowercase();
    }

    let mut formatted = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        let gap = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        formatted.push_str(&rest[..gap]);
        rest = &rest[gap..];

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..end];
        if KNOWN_UNITS.iter().any(|unit| token.eq_ignore_ascii_case(unit)) {
            formatted.push_str(&token.to_ascii_lowercase());
        } else {
            formatted.push_str(token);
        }
        rest = &rest[end..];
    }

    formatted
}

/// Format amount in Finnish style (1 234,56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = digits.split_once('.') else {
        return s.to_string();
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}

/// Format amount with a currency suffix (1,95 €).
pub fn format_price(amount: Decimal, currency_suffix: &str) -> String {
    if currency_suffix.is_empty() {
        format_amount(amount)
    } else {
        format!("{} {}", format_amount(amount), currency_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1,95").unwrap(), dec("1.95"));
        assert_eq!(parse_price("1,95 €").unwrap(), dec("1.95"));
        assert_eq!(parse_price("  12,00€").unwrap(), dec("12.00"));
        assert_eq!(parse_price("0.35").unwrap(), dec("0.35"));
    }

    #[test]
    fn test_parse_price_malformed() {
        for bad in ["", "€", "abc", "1,9,5", "-1,00", "1 234,56", "1e3"] {
            assert_eq!(
                parse_price(bad),
                Err(ExtractionError::MalformedNumber {
                    field: "price".to_string(),
                    value: bad.to_string(),
                }),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_quantity_number() {
        assert_eq!(parse_quantity_number("0,512").unwrap(), dec("0.512"));
        assert_eq!(parse_quantity_number("3").unwrap(), dec("3"));
        assert!(parse_quantity_number("x").is_err());
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity("1"), "1 kpl");
        assert_eq!(format_quantity("2 KG"), "2 kg");
        assert_eq!(format_quantity("3 KPL"), "3 kpl");
        assert_eq!(format_quantity("0,512  Kg"), "0,512  kg");
        assert_eq!(format_quantity("2\tKPL"), "2\tkpl");
        assert_eq!(format_quantity("2 PSS"), "2 PSS");
        assert_eq!(format_quantity("2KG"), "2kg");
        assert_eq!(format_quantity("4"), "4");
    }

    #[test]
    fn test_format_quantity_is_stable() {
        for q in ["1", "2 KG", "3 KPL", "0,5 kg"] {
            let once = format_quantity(q);
            assert_eq!(format_quantity(&once), once);
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1.95")), "1,95");
        assert_eq!(format_amount(dec("1234.5")), "1 234,50");
        assert_eq!(format_amount(dec("12345678.90")), "12 345 678,90");
        assert_eq!(format_amount(dec("-1234.56")), "-1 234,56");
        assert_eq!(format_amount(Decimal::ZERO), "0,00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("1.95"), "€"), "1,95 €");
        assert_eq!(format_price(dec("1.95"), ""), "1,95");
    }
}
