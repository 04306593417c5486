use rust_decimal::prelude::*;

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

pub fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Non-finite, negative or unrepresentable values become zero.
pub fn decimal_from_f64(raw: f64) -> Decimal {
    if !raw.is_finite() || raw <= 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(raw).unwrap_or(Decimal::ZERO)
}

/// Parses amounts the way they are typed into a form field, e.g. `"500 000,50"`.
/// Anything malformed is treated as zero.
pub fn parse_amount_input(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .map(non_negative)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn f64_input_is_sanitized() {
        assert_eq!(decimal_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from_f64(-5.0), Decimal::ZERO);
        assert_eq!(decimal_from_f64(1e300), Decimal::ZERO);
        assert_eq!(decimal_from_f64(12.5), dec!(12.5));
    }

    #[test]
    fn parses_typed_amounts() {
        assert_eq!(parse_amount_input("500 000,50"), dec!(500000.50));
        assert_eq!(parse_amount_input("1\u{a0}000"), dec!(1000));
        assert_eq!(parse_amount_input(" 42.1 "), dec!(42.1));
        assert_eq!(parse_amount_input(""), Decimal::ZERO);
        assert_eq!(parse_amount_input("abc"), Decimal::ZERO);
        assert_eq!(parse_amount_input("1.2.3"), Decimal::ZERO);
        assert_eq!(parse_amount_input("-5"), Decimal::ZERO);
    }
}
