use crate::error::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

/// Parse a signed integer from raw bytes.
///
/// `base` must be in `2..=36`; letters are case-insensitive digits above 9.
/// Magnitudes beyond the i64 range saturate to `i64::MIN`/`i64::MAX` while the
/// remaining digits are still validated. `bit_size` of 8, 16 or 32 then
/// rejects values that do not fit that width; 0 and 64 accept the full range.
///
/// # Examples
/// ```
/// use sjson::num::parse_int;
///
/// assert_eq!(parse_int(b"-ff", 16, 64), Ok(-255));
/// assert_eq!(parse_int(b"99999999999999999999", 10, 64), Ok(i64::MAX));
/// assert!(parse_int(b"128", 10, 8).is_err());
/// ```
pub fn parse_int(bytes: &[u8], base: u32, bit_size: u32) -> Result<i64> {
    check_base(base)?;
    let (negative, offset) = split_sign(bytes)?;
    let magnitude = accumulate(bytes, offset, base)?;

    let value = match magnitude {
        Some(m) if negative && m <= 1 << 63 => (m as i64).wrapping_neg(),
        Some(m) if !negative && m <= i64::MAX as u64 => m as i64,
        _ if negative => i64::MIN,
        _ => i64::MAX,
    };

    let fits = match bit_size {
        8 => i8::try_from(value).is_ok(),
        16 => i16::try_from(value).is_ok(),
        32 => i32::try_from(value).is_ok(),
        _ => true,
    };
    if fits {
        Ok(value)
    } else {
        Err(ParseError::OutOfRange { bits: bit_size })
    }
}

/// Parse an unsigned integer from raw bytes.
///
/// Same rules as [`parse_int`], except that a leading `-` is invalid and
/// overflow saturates to `u64::MAX`.
pub fn parse_uint(bytes: &[u8], base: u32, bit_size: u32) -> Result<u64> {
    check_base(base)?;
    if bytes.first() == Some(&b'-') {
        return Err(ParseError::InvalidDigit {
            byte: b'-',
            position: 0,
        });
    }
    let (_, offset) = split_sign(bytes)?;
    let value = accumulate(bytes, offset, base)?.unwrap_or(u64::MAX);

    let fits = match bit_size {
        8 => u8::try_from(value).is_ok(),
        16 => u16::try_from(value).is_ok(),
        32 => u32::try_from(value).is_ok(),
        _ => true,
    };
    if fits {
        Ok(value)
    } else {
        Err(ParseError::OutOfRange { bits: bit_size })
    }
}

/// Parse a decimal float: optional sign, digits, optional `.digits`, optional
/// `e`/`E` exponent with optional sign.
///
/// This is a fast approximation. Results are close to, but not always
/// bit-identical with, a correctly rounded parse. With `bit_size == 32` the
/// result is rounded to f32 precision.
pub fn parse_float(bytes: &[u8], bit_size: u32) -> Result<f64> {
    let (negative, mut idx) = split_sign_lenient(bytes)?;
    let mut value = 0.0f64;
    let mut saw_digit = false;

    while idx < bytes.len() {
        match bytes[idx] {
            b @ b'0'..=b'9' => {
                value = value * 10.0 + (b - b'0') as f64;
                saw_digit = true;
            }
            b'.' | b'e' | b'E' => break,
            byte => {
                return Err(ParseError::InvalidDigit {
                    byte,
                    position: idx,
                })
            }
        }
        idx += 1;
    }

    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        let mut weight = 0.1f64;
        while idx < bytes.len() {
            match bytes[idx] {
                b @ b'0'..=b'9' => {
                    value += weight * (b - b'0') as f64;
                    weight *= 0.1;
                    saw_digit = true;
                }
                b'e' | b'E' => break,
                byte => {
                    return Err(ParseError::InvalidDigit {
                        byte,
                        position: idx,
                    })
                }
            }
            idx += 1;
        }
    }

    if !saw_digit {
        return Err(ParseError::MissingDigits);
    }

    if idx < bytes.len() {
        // only an exponent marker can stop the loops above without an error
        let (exp_negative, exponent) = parse_exponent(&bytes[idx + 1..])?;
        value = scale(value, exponent, exp_negative);
    }

    if negative {
        value = -value;
    }
    if bit_size == 32 {
        value = value as f32 as f64;
    }
    Ok(value)
}

fn check_base(base: u32) -> Result<()> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(ParseError::InvalidBase(base))
    }
}

/// Returns whether the literal is negative and where its digits start.
fn split_sign(bytes: &[u8]) -> Result<(bool, usize)> {
    let (negative, offset) = split_sign_lenient(bytes)?;
    if offset == bytes.len() {
        return Err(ParseError::MissingDigits);
    }
    Ok((negative, offset))
}

fn split_sign_lenient(bytes: &[u8]) -> Result<(bool, usize)> {
    match bytes.first() {
        None => Err(ParseError::Empty),
        Some(b'-') => Ok((true, 1)),
        Some(b'+') => Ok((false, 1)),
        Some(_) => Ok((false, 0)),
    }
}

/// Accumulates the digits from `offset`; `None` means the magnitude overflowed u64.
fn accumulate(bytes: &[u8], offset: usize, base: u32) -> Result<Option<u64>> {
    let mut acc = Some(0u64);
    for (position, &byte) in bytes.iter().enumerate().skip(offset) {
        let digit = digit_value(byte).ok_or(ParseError::InvalidDigit { byte, position })?;
        if digit >= base {
            return Err(ParseError::DigitOutOfBase { digit, base });
        }
        acc = acc
            .and_then(|v| v.checked_mul(base as u64))
            .and_then(|v| v.checked_add(digit as u64));
    }
    Ok(acc)
}

#[inline]
fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'z' => Some((byte - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((byte - b'A') as u32 + 10),
        _ => None,
    }
}

fn parse_exponent(bytes: &[u8]) -> Result<(bool, u32)> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return Err(ParseError::InvalidExponent);
    }
    let mut exponent = 0u32;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(ParseError::InvalidExponent);
        }
        exponent = exponent.saturating_mul(10).saturating_add((b - b'0') as u32);
    }
    Ok((negative, exponent))
}

fn scale(mut value: f64, exponent: u32, negative: bool) -> f64 {
    for _ in 0..exponent {
        // zero and infinity are fixed points
        if value == 0.0 || value.is_infinite() {
            break;
        }
        if negative {
            value /= 10.0;
        } else {
            value *= 10.0;
        }
    }
    value
}
