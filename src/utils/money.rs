use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;
use std::str::FromStr;

/// Number of fractional digits kept for every stored amount.
pub const SCALE: u32 = 2;

/// Largest amount a `NUMERIC(12, 2)` column holds: 9999999999.99.
pub const MAX: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, SCALE);

/// Rounds to the stored precision (half away from zero).
pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}

/// "150.5" -> "150.50"
pub fn format(amount: &Decimal) -> String {
    normalize(*amount).to_string()
}

/// serde helper: amounts go over the wire as two-digit strings.
pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(amount))
}

/// Parses a plain or scientific decimal literal ("150.50", "-3", "1.5e2").
pub fn parse(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    Decimal::from_str(input)
        .ok()
        .or_else(|| Decimal::from_scientific(input).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_matches_column_precision() {
        assert_eq!(MAX.to_string(), "9999999999.99");
    }

    #[test]
    fn test_format_pads_to_two_digits() {
        assert_eq!(format(&Decimal::from_str("150.5").unwrap()), "150.50");
        assert_eq!(format(&Decimal::from(200)), "200.00");
        assert_eq!(format(&Decimal::from_str("0.005").unwrap()), "0.01");
    }

    #[test]
    fn test_parse_accepts_numeric_strings() {
        assert_eq!(parse("150.50"), Some(Decimal::from_str("150.50").unwrap()));
        assert_eq!(parse(" -50 "), Some(Decimal::from(-50)));
        assert_eq!(parse("1.5e2"), Some(Decimal::from(150)));
        assert_eq!(parse("abc"), None);
        assert_eq!(parse(""), None);
    }
}
