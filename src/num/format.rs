use std::fmt::{self, Write as _};

use crate::constants::NULL;
use crate::num::sink::DigitSink;
use crate::options::FloatFormat;

const SMALL_TABLE_LEN: usize = 10_000;

/// Significant digits used by [`FloatFormat::Fast`].
const GENERAL_PRECISION: usize = 6;

// -2^63 and 2^63; the upper bound is exclusive because i64::MAX is not representable.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const I32_LOWER: f32 = -2_147_483_648.0;
const I32_UPPER: f32 = 2_147_483_648.0;

#[derive(Clone, Copy)]
struct SmallDecimal {
    len: u8,
    bytes: [u8; 4],
}

impl SmallDecimal {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

const fn render_small(mut n: usize) -> SmallDecimal {
    let mut reversed = [0u8; 4];
    let mut len = 0;
    loop {
        reversed[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let mut bytes = [0u8; 4];
    let mut i = 0;
    while i < len {
        bytes[i] = reversed[len - 1 - i];
        i += 1;
    }
    SmallDecimal {
        len: len as u8,
        bytes,
    }
}

const fn build_small_table() -> [SmallDecimal; SMALL_TABLE_LEN] {
    let mut table = [SmallDecimal {
        len: 0,
        bytes: [0; 4],
    }; SMALL_TABLE_LEN];
    let mut n = 0;
    while n < SMALL_TABLE_LEN {
        table[n] = render_small(n);
        n += 1;
    }
    table
}

const fn build_digit_pairs() -> [u8; 200] {
    let mut pairs = [0u8; 200];
    let mut n = 0;
    while n < 100 {
        pairs[n * 2] = b'0' + (n / 10) as u8;
        pairs[n * 2 + 1] = b'0' + (n % 10) as u8;
        n += 1;
    }
    pairs
}

/// Decimal renderings of 0..10_000.
static SMALL_DECIMALS: [SmallDecimal; SMALL_TABLE_LEN] = build_small_table();

/// Zero-padded "00".."99".
static DIGIT_PAIRS: [u8; 200] = build_digit_pairs();

/// Append the decimal rendering of `value`.
///
/// # Examples
/// ```
/// let mut out = Vec::new();
/// sjson::num::append_uint(&mut out, 18_446_744_073_709_551_615);
/// assert_eq!(out, b"18446744073709551615");
/// ```
#[inline]
pub fn append_uint<S: DigitSink + ?Sized>(out: &mut S, value: u64) {
    if value < 10 {
        out.push_byte(b'0' + value as u8);
        return;
    }
    if value < SMALL_TABLE_LEN as u64 {
        out.push_bytes(SMALL_DECIMALS[value as usize].as_bytes());
        return;
    }
    if value < 100_000_000 {
        append_uint_pairs(out, value as u32);
        return;
    }
    let mut buf = itoa::Buffer::new();
    out.push_bytes(buf.format(value).as_bytes());
}

/// Append the decimal rendering of `value`, with a leading `-` when negative.
#[inline]
pub fn append_int<S: DigitSink + ?Sized>(out: &mut S, value: i64) {
    if value < 0 {
        out.push_byte(b'-');
        // unsigned_abs keeps i64::MIN representable
        append_uint(out, value.unsigned_abs());
        return;
    }
    append_uint(out, value as u64);
}

fn append_uint_pairs<S: DigitSink + ?Sized>(out: &mut S, mut value: u32) {
    let len = value.ilog10() as usize + 1;
    let span = out.extend_zeroed(len);
    let mut pos = len;
    while value >= 100 {
        let pair = (value % 100) as usize * 2;
        value /= 100;
        pos -= 2;
        span[pos..pos + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    }
    if value >= 10 {
        let pair = value as usize * 2;
        pos -= 2;
        span[pos..pos + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    } else {
        pos -= 1;
        span[pos] = b'0' + value as u8;
    }
    debug_assert_eq!(pos, 0);
}

/// Append a 64-bit float.
///
/// Integral values inside the i64 range render as integers. Non-finite values
/// have no JSON form and render as `null`.
pub fn append_f64<S: DigitSink + ?Sized>(out: &mut S, value: f64, format: FloatFormat) {
    if !value.is_finite() {
        out.push_bytes(NULL);
        return;
    }
    if value.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&value) {
        append_int(out, value as i64);
        return;
    }
    match format {
        FloatFormat::Fast => append_general(out, value),
        FloatFormat::Shortest => {
            let mut buf = ryu::Buffer::new();
            out.push_bytes(buf.format_finite(value).as_bytes());
        }
    }
}

/// Append a 32-bit float; integral values inside the i32 range render as integers.
pub fn append_f32<S: DigitSink + ?Sized>(out: &mut S, value: f32, format: FloatFormat) {
    if !value.is_finite() {
        out.push_bytes(NULL);
        return;
    }
    if value.fract() == 0.0 && (I32_LOWER..I32_UPPER).contains(&value) {
        append_int(out, value as i64);
        return;
    }
    match format {
        // widening is exact, so the six digits are those of the f32 value
        FloatFormat::Fast => append_general(out, value as f64),
        FloatFormat::Shortest => {
            let mut buf = ryu::Buffer::new();
            out.push_bytes(buf.format_finite(value).as_bytes());
        }
    }
}

/// Fixed stack space for one `{:e}` rendering.
struct ExpScratch {
    bytes: [u8; 32],
    len: usize,
}

impl ExpScratch {
    fn new() -> Self {
        Self {
            bytes: [0; 32],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl fmt::Write for ExpScratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.bytes.len() {
            return Err(fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// `%g` with six significant digits: fixed notation unless the decimal
/// exponent is below -4 or at least the precision, trailing zeros trimmed,
/// exponent signed and at least two digits wide.
fn append_general<S: DigitSink + ?Sized>(out: &mut S, value: f64) {
    let mut scratch = ExpScratch::new();
    if write!(scratch, "{:.*e}", GENERAL_PRECISION - 1, value).is_err() {
        let mut buf = ryu::Buffer::new();
        out.push_bytes(buf.format_finite(value).as_bytes());
        return;
    }

    let text = scratch.as_bytes();
    let (negative, text) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };

    let mut digits = [b'0'; GENERAL_PRECISION];
    let mut count = 0;
    let mut idx = 0;
    while idx < text.len() && text[idx] != b'e' {
        if text[idx].is_ascii_digit() && count < digits.len() {
            digits[count] = text[idx];
            count += 1;
        }
        idx += 1;
    }
    let exp = parse_exponent(text.get(idx + 1..).unwrap_or_default());

    while count > 1 && digits[count - 1] == b'0' {
        count -= 1;
    }
    let digits = &digits[..count];
    let point = exp + 1;

    let mut exp_limit = GENERAL_PRECISION as i32;
    if exp_limit > count as i32 && count as i32 >= point {
        exp_limit = count as i32;
    }

    if negative {
        out.push_byte(b'-');
    }
    if exp < -4 || exp >= exp_limit {
        write_exponential(out, digits, exp);
    } else {
        write_fixed(out, digits, point);
    }
}

fn parse_exponent(text: &[u8]) -> i32 {
    let (negative, text) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    let magnitude = text
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, b| acc * 10 + (b - b'0') as i32);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn write_exponential<S: DigitSink + ?Sized>(out: &mut S, digits: &[u8], exp: i32) {
    out.push_byte(digits[0]);
    if digits.len() > 1 {
        out.push_byte(b'.');
        out.push_bytes(&digits[1..]);
    }
    out.push_byte(b'e');
    out.push_byte(if exp < 0 { b'-' } else { b'+' });
    let magnitude = exp.unsigned_abs();
    if magnitude < 10 {
        out.push_bytes(&[b'0', b'0' + magnitude as u8]);
    } else if magnitude < 100 {
        let pair = magnitude as usize * 2;
        out.push_bytes(&DIGIT_PAIRS[pair..pair + 2]);
    } else {
        append_uint(out, magnitude as u64);
    }
}

fn write_fixed<S: DigitSink + ?Sized>(out: &mut S, digits: &[u8], point: i32) {
    if point > 0 {
        for i in 0..point as usize {
            out.push_byte(digits.get(i).copied().unwrap_or(b'0'));
        }
    } else {
        out.push_byte(b'0');
    }

    let fraction = (digits.len() as i32 - point).max(0);
    if fraction > 0 {
        out.push_byte(b'.');
        for i in 0..fraction {
            let j = point + i;
            let digit = if j >= 0 {
                digits.get(j as usize).copied().unwrap_or(b'0')
            } else {
                b'0'
            };
            out.push_byte(digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use smallvec::SmallVec;

    use super::*;

    fn uint(value: u64) -> String {
        let mut out = Vec::new();
        append_uint(&mut out, value);
        String::from_utf8(out).unwrap()
    }

    fn fast(value: f64) -> String {
        let mut out = Vec::new();
        append_f64(&mut out, value, FloatFormat::Fast);
        String::from_utf8(out).unwrap()
    }

    fn fast32(value: f32) -> String {
        let mut out = Vec::new();
        append_f32(&mut out, value, FloatFormat::Fast);
        String::from_utf8(out).unwrap()
    }

    #[rstest]
    fn test_small_table_matches_std() {
        for n in 0..SMALL_TABLE_LEN {
            assert_eq!(SMALL_DECIMALS[n].as_bytes(), n.to_string().as_bytes());
        }
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(10)]
    #[case(9_999)]
    #[case(10_000)]
    #[case(10_005)]
    #[case(100_001)]
    #[case(1_000_000)]
    #[case(12_345_678)]
    #[case(99_999_999)]
    #[case(100_000_000)]
    #[case(4_294_967_296)]
    #[case(u64::MAX)]
    fn test_append_uint_every_path(#[case] value: u64) {
        assert_eq!(uint(value), value.to_string());
    }

    #[rstest]
    fn test_pairwise_range_sweep() {
        for value in (10_000u64..100_000_000).step_by(9_973) {
            assert_eq!(uint(value), value.to_string());
        }
    }

    #[rstest]
    fn test_append_int_bounds() {
        let mut out = Vec::new();
        append_int(&mut out, i64::MIN);
        assert_eq!(out, b"-9223372036854775808");

        out.clear();
        append_int(&mut out, i64::MAX);
        assert_eq!(out, b"9223372036854775807");

        out.clear();
        append_int(&mut out, -5);
        assert_eq!(out, b"-5");
    }

    #[rstest]
    fn test_append_into_smallvec() {
        let mut out: SmallVec<[u8; 24]> = SmallVec::new();
        append_int(&mut out, -12_345_678);
        assert_eq!(out.as_slice(), b"-12345678");
        assert!(!out.spilled());
    }

    #[rstest]
    #[case(1.0, "1")]
    #[case(-42.0, "-42")]
    #[case(-0.0, "0")]
    #[case(1e15, "1000000000000000")]
    #[case(0.5, "0.5")]
    #[case(0.1, "0.1")]
    #[case(-1.5, "-1.5")]
    #[case(3.141592653589793, "3.14159")]
    #[case(123456.7, "123457")]
    #[case(1234567.5, "1.23457e+06")]
    #[case(999999.5, "1e+06")]
    #[case(0.0001234, "0.0001234")]
    #[case(0.00001234, "1.234e-05")]
    #[case(1.5e-300, "1.5e-300")]
    #[case(1e21, "1e+21")]
    #[case(2.5e100, "2.5e+100")]
    fn test_fast_float_format(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(fast(value), expected);
    }

    #[rstest]
    fn test_non_finite_renders_null() {
        assert_eq!(fast(f64::NAN), "null");
        assert_eq!(fast(f64::INFINITY), "null");
        assert_eq!(fast32(f32::NEG_INFINITY), "null");
    }

    #[rstest]
    #[case(3.0, "3")]
    #[case(-2147483648.0, "-2147483648")]
    #[case(0.1, "0.1")]
    #[case(1.5, "1.5")]
    #[case(1e10, "1e+10")]
    #[case(16777217.0, "16777216")]
    fn test_fast_float32_format(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(fast32(value), expected);
    }

    #[rstest]
    fn test_shortest_format() {
        let mut out = Vec::new();
        append_f64(&mut out, 0.1234567, FloatFormat::Shortest);
        assert_eq!(out, b"0.1234567");

        out.clear();
        append_f64(&mut out, 2.0, FloatFormat::Shortest);
        assert_eq!(out, b"2");

        out.clear();
        append_f32(&mut out, 0.1, FloatFormat::Shortest);
        assert_eq!(out, b"0.1");
    }
}
