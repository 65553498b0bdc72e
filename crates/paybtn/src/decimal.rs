//! Locale-independent fixed-point decimal parsing and formatting.
//!
//! Amounts are exact decimals, never binary floats. The text form always
//! uses `.` as the separator regardless of host locale, and the canonical
//! rendering carries exactly two fraction digits.

use crate::error::FormatError;
use crate::text::is_blank;

/// An exact decimal number `mantissa * 10^exponent`.
///
/// Kept normalized: the mantissa carries no trailing zeros, and zero is
/// `{0, 0}`. Two normalized decimals are equal exactly when they denote
/// the same number, so derived equality is value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i64,
    exponent: i32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        exponent: 0,
    };

    /// Creates a decimal, normalizing trailing zeros out of the mantissa.
    pub fn new(mantissa: i64, exponent: i32) -> Decimal {
        let mut mantissa = mantissa;
        let mut exponent = exponent;
        if mantissa == 0 {
            return Decimal::ZERO;
        }
        while mantissa % 10 == 0 {
            mantissa /= 10;
            exponent += 1;
        }
        Decimal { mantissa, exponent }
    }

    /// Creates a decimal from a whole number of hundredths (e.g. cents).
    pub fn from_hundredths(hundredths: i64) -> Decimal {
        Decimal::new(hundredths, -2)
    }

    pub fn mantissa(&self) -> i64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }
}

/// Parses a decimal from text; blank maps to `Ok(None)`.
///
/// Accepts `[+|-] digits [ '.' digits ]` with at least one digit, `.` as
/// the only recognized separator, and nothing else: no grouping
/// characters, no exponent notation, no partial prefixes. Values whose
/// digits exceed the i64 mantissa fail with
/// [`FormatError::DecimalOutOfRange`].
pub fn parse_decimal(s: &str) -> Result<Option<Decimal>, FormatError> {
    if is_blank(s) {
        return Ok(None);
    }
    let trimmed = s.trim();
    match parse_decimal_text(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(value = trimmed, error = %err, "failed to parse decimal");
            Err(err)
        }
    }
}

fn parse_decimal_text(s: &str) -> Result<Decimal, FormatError> {
    let malformed = || FormatError::MalformedDecimal {
        value: s.to_string(),
    };
    let out_of_range = || FormatError::DecimalOutOfRange {
        value: s.to_string(),
    };

    let bytes = s.as_bytes();
    let (negative, rest) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let (int_digits, frac_digits) = match rest.iter().position(|&b| b == b'.') {
        Some(dot) => {
            let frac = &rest[dot + 1..];
            if frac.contains(&b'.') {
                return Err(malformed());
            }
            (&rest[..dot], frac)
        }
        None => (rest, &rest[rest.len()..]),
    };

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(malformed());
    }

    let mut mantissa: i64 = 0;
    for &b in int_digits.iter().chain(frac_digits) {
        if !b.is_ascii_digit() {
            return Err(malformed());
        }
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add((b - b'0') as i64))
            .ok_or_else(out_of_range)?;
    }
    if negative {
        mantissa = -mantissa;
    }

    Ok(Decimal::new(mantissa, -(frac_digits.len() as i32)))
}

/// Formats a decimal with exactly two fraction digits and `.` separator.
///
/// Absent is treated as zero and renders as `"0.00"`. Values carrying
/// more than two fraction digits round half-to-even. Formatting is done
/// on digit strings, so no magnitude can overflow it.
pub fn format_decimal(value: Option<Decimal>) -> String {
    let value = value.unwrap_or(Decimal::ZERO);
    let digits = value.mantissa.unsigned_abs().to_string().into_bytes();

    // Split the mantissa digits into integer and fraction parts.
    let (mut int_digits, mut frac_digits): (Vec<u8>, Vec<u8>) = if value.exponent >= 0 {
        let mut int = digits;
        int.extend(std::iter::repeat_n(b'0', value.exponent as usize));
        (int, Vec::new())
    } else {
        let frac_len = value.exponent.unsigned_abs() as usize;
        if digits.len() <= frac_len {
            let mut frac = vec![b'0'; frac_len - digits.len()];
            frac.extend_from_slice(&digits);
            (vec![b'0'], frac)
        } else {
            let split = digits.len() - frac_len;
            (digits[..split].to_vec(), digits[split..].to_vec())
        }
    };

    if frac_digits.len() < 2 {
        frac_digits.resize(2, b'0');
    } else if frac_digits.len() > 2 {
        let tail = frac_digits.split_off(2);
        if rounds_up(&frac_digits, &tail) {
            increment(&mut int_digits, &mut frac_digits);
        }
    }

    // A value that rounds to zero renders unsigned.
    let nonzero = int_digits
        .iter()
        .chain(frac_digits.iter())
        .any(|&b| b != b'0');

    let mut out = String::with_capacity(int_digits.len() + 4);
    if value.mantissa < 0 && nonzero {
        out.push('-');
    }
    for &b in &int_digits {
        out.push(b as char);
    }
    out.push('.');
    for &b in &frac_digits {
        out.push(b as char);
    }
    out
}

/// Half-to-even decision for truncating `tail` after the two kept digits.
fn rounds_up(kept: &[u8], tail: &[u8]) -> bool {
    let first = tail[0];
    if first < b'5' {
        return false;
    }
    if first > b'5' {
        return true;
    }
    if tail[1..].iter().any(|&b| b != b'0') {
        return true;
    }
    // Exact half: round to the even neighbor.
    (kept[kept.len() - 1] - b'0') % 2 == 1
}

/// Adds one unit in the last place to the digit string `int . frac`.
fn increment(int_digits: &mut Vec<u8>, frac_digits: &mut [u8]) {
    for b in frac_digits.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return;
        }
    }
    for b in int_digits.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return;
        }
    }
    int_digits.insert(0, b'1');
}
