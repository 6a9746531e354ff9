//! Float rendering.
//!
//! Floats print with the shortest digit string that round-trips. Exponent
//! notation kicks in when the decimal exponent is below -4 or at least 16;
//! it always carries a sign and at least two exponent digits (`1e-05`,
//! `6.02e+23`). Positional output of an integral value keeps a trailing
//! `.0` so it still reads as a float.

use core::fmt::Write;

/// Renders `n`, including the non-standard `NaN`, `Infinity` and
/// `-Infinity` tokens.
pub(crate) fn repr(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-6.02e23`, `0e0`.
    let sci = format!("{n:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;
    if !(-3..=16).contains(&point) {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "e{sign}{:02}", exponent.unsigned_abs());
    } else if point <= 0 {
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let point = point as usize;
        if point >= digits.len() {
            out.push_str(&digits);
            out.extend(core::iter::repeat_n('0', point - digits.len()));
            out.push_str(".0");
        } else {
            let (whole, frac) = digits.split_at(point);
            out.push_str(whole);
            out.push('.');
            out.push_str(frac);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::repr;

    #[test]
    fn pool_floats() {
        assert_eq!(repr(0.0), "0.0");
        assert_eq!(repr(3.14159), "3.14159");
        assert_eq!(repr(6.02e23), "6.02e+23");
        assert_eq!(repr(1e-30), "1e-30");
    }

    #[test]
    fn non_finite_tokens() {
        assert_eq!(repr(f64::NAN), "NaN");
        assert_eq!(repr(f64::INFINITY), "Infinity");
        assert_eq!(repr(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn notation_thresholds() {
        assert_eq!(repr(1e16), "1e+16");
        assert_eq!(repr(1e15), "1000000000000000.0");
        assert_eq!(repr(1e-5), "1e-05");
        assert_eq!(repr(0.0001), "0.0001");
    }

    #[test]
    fn signs_and_fractions() {
        assert_eq!(repr(-0.0), "-0.0");
        assert_eq!(repr(-2.5), "-2.5");
        assert_eq!(repr(123_456_789.125), "123456789.125");
        assert_eq!(repr(1.5e300), "1.5e+300");
        assert_eq!(repr(5e-324), "5e-324");
    }
}
