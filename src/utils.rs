/// Literal rendered for zero (and NaN) instead of going through the formatter.
pub const ZERO_LABEL: &str = "0,00 × 10⁰";

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Formats a value as `m,mm × 10ⁿ` with a comma decimal separator and a
/// superscript exponent. The mantissa keeps at most two decimals and drops
/// trailing zeros ("1 × 10³", "1,5 × 10³"). Used for y-axis ticks and the
/// hover read-out.
pub fn format_scientific(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        return ZERO_LABEL.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    // `{:.2e}` gives "1.23e3" / "-1.20e-4"
    let formatted = format!("{:.2e}", value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };

    format!("{} × 10{}", mantissa.replace('.', ","), superscript(exponent))
}

fn superscript(exponent: &str) -> String {
    exponent
        .chars()
        .filter_map(|c| match c {
            '-' => Some('⁻'),
            _ => c.to_digit(10).map(|d| SUPERSCRIPT_DIGITS[d as usize]),
        })
        .collect()
}

/// Rounds to `decimals` places, breaking exact ties away from zero.
///
/// `{:.N}` alone resolves ties to the even digit; a value sitting exactly on
/// the midpoint is nudged one ulp outward first so it rounds up in magnitude.
pub fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let magnitude = value.abs();
    let magnitude = if is_decimal_tie(magnitude, decimals) {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };

    let rounded: f64 = format!("{:.*}", decimals, magnitude).parse().unwrap_or(magnitude);
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// True when the exact decimal expansion of `magnitude` is `...d5` at
/// position `decimals + 1` followed only by zeros.
fn is_decimal_tie(magnitude: f64, decimals: usize) -> bool {
    // every finite f64 has at most 1074 fractional digits
    let exact = format!("{:.1074}", magnitude);
    let fraction = exact.split_once('.').map_or("", |(_, f)| f);
    fraction.get(decimals..).map(|tail| tail.trim_end_matches('0')) == Some("5")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_uses_literal() {
        assert_eq!(format_scientific(0.0), "0,00 × 10⁰");
        assert_eq!(format_scientific(-0.0), "0,00 × 10⁰");
        assert_eq!(format_scientific(f64::NAN), "0,00 × 10⁰");
    }

    #[test]
    fn test_positive_exponent() {
        assert_eq!(format_scientific(1234.0), "1,23 × 10³");
        assert_eq!(format_scientific(1.2e15), "1,2 × 10¹⁵");
    }

    #[test]
    fn test_negative_exponent_and_mantissa() {
        assert_eq!(format_scientific(-0.000123), "-1,23 × 10⁻⁴");
        assert_eq!(format_scientific(0.05), "5 × 10⁻²");
        assert_eq!(format_scientific(-0.00012), "-1,2 × 10⁻⁴");
    }

    #[test]
    fn test_mantissa_rounding_carries_into_exponent() {
        assert_eq!(format_scientific(9.999), "1 × 10¹");
    }

    #[test]
    fn test_mantissa_drops_trailing_zeros() {
        assert_eq!(format_scientific(1000.0), "1 × 10³");
        assert_eq!(format_scientific(1500.0), "1,5 × 10³");
        assert_eq!(format_scientific(5.5), "5,5 × 10⁰");
        assert_eq!(format_scientific(-2.0), "-2 × 10⁰");
        assert_eq!(format_scientific(10.0), "1 × 10¹");
    }

    #[test]
    fn test_infinity() {
        assert_eq!(format_scientific(f64::INFINITY), "∞");
        assert_eq!(format_scientific(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to_decimals(0.123456789123, 8), 0.12345679);
        assert_eq!(round_to_decimals(-1.5, 8), -1.5);
        assert_eq!(round_to_decimals(2.0, 8), 2.0);
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        // 2^-9 sits exactly between 0.00195312 and 0.00195313
        assert_eq!(round_to_decimals(0.001953125, 8), 0.00195313);
        assert_eq!(round_to_decimals(-0.001953125, 8), -0.00195313);
        assert_eq!(round_to_decimals(0.125, 2), 0.13);
        assert_eq!(round_to_decimals(2.5, 0), 3.0);
        assert_eq!(round_to_decimals(0.1251, 2), 0.13);
        assert_eq!(round_to_decimals(0.1249, 2), 0.12);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_to_decimals(f64::NAN, 8).is_nan());
        assert_eq!(round_to_decimals(f64::INFINITY, 8), f64::INFINITY);
    }
}
