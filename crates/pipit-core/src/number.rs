//! Numeric text conversions shared by the value model and arithmetic builtins

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

// Keeps `1e999999999` from allocating a gigantic power of ten.
const MAX_DECIMAL_SHIFT: u64 = 4096;

/// Parse a base-10 floating-point literal.
pub fn parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Format a float in the shortest general form: plain decimal for moderate
/// exponents, `d.ddde±XX` otherwise.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e6".
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return x.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return x.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::new();
    if x < 0.0 {
        out.push('-');
    }

    if !(-4..6).contains(&exp) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exp.abs()));
        return out;
    }

    let point = exp + 1;
    if point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat((-point) as usize));
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        out.push_str(&"0".repeat(point as usize - digits.len()));
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Parse `n`, `n/d` or a decimal literal such as `-1.25e3` into an exact
/// rational.
pub fn parse_rat(text: &str) -> Option<BigRational> {
    let text = text.trim();
    if let Some((num, den)) = text.split_once('/') {
        let num: BigInt = num.parse().ok()?;
        let den: BigInt = den.parse().ok()?;
        if den.is_zero() {
            return None;
        }
        return Some(BigRational::new(num, den));
    }

    let (mantissa, exp) = match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], text[idx + 1..].parse::<i64>().ok()?),
        None => (text, 0),
    };
    let (negative, body) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits: BigInt = format!("0{int_part}{frac_part}").parse().ok()?;
    let shift = exp.checked_sub(frac_part.len() as i64)?;
    if shift.unsigned_abs() > MAX_DECIMAL_SHIFT {
        return None;
    }
    let scale = num_traits::pow(BigInt::from(10), shift.unsigned_abs() as usize);
    let value = if shift >= 0 {
        BigRational::from_integer(digits * scale)
    } else {
        BigRational::new(digits, scale)
    };
    Some(if negative { -value } else { value })
}

/// Render a rational as `n` when it is integral, `n/d` otherwise.
pub fn format_rat(rat: &BigRational) -> String {
    if rat.is_integer() {
        rat.numer().to_string()
    } else {
        let sign = if rat.is_negative() { "-" } else { "" };
        format!("{sign}{}/{}", rat.numer().abs(), rat.denom())
    }
}

#[cfg(test)]
#[path = "number_tests.rs"]
mod number_tests;
