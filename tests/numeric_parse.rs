use rstest::rstest;
use sjson::num::{append_f64, append_int, append_uint, parse_float, parse_int, parse_uint};
use sjson::{FloatFormat, ParseError};

fn render_int(value: i64) -> Vec<u8> {
    let mut out = Vec::new();
    append_int(&mut out, value);
    out
}

#[rstest]
fn numeric_int_round_trip_sweep() {
    let mut value = 1i64;
    while value < i64::MAX / 7 {
        for candidate in [value, -value, value - 1, -(value + 1)] {
            assert_eq!(parse_int(&render_int(candidate), 10, 64), Ok(candidate));
        }
        value *= 7;
    }
}

#[rstest]
fn numeric_uint_round_trip_sweep() {
    let mut value = 1u64;
    while value < u64::MAX / 3 {
        let mut out = Vec::new();
        append_uint(&mut out, value);
        assert_eq!(parse_uint(&out, 10, 64), Ok(value));
        value = value * 3 + 1;
    }
}

#[rstest]
#[case(b"9223372036854775807", i64::MAX)]
#[case(b"-9223372036854775808", i64::MIN)]
#[case(b"92233720368547758079", i64::MAX)]
#[case(b"-92233720368547758089", i64::MIN)]
fn numeric_int_saturation(#[case] input: &[u8], #[case] expected: i64) {
    assert_eq!(parse_int(input, 10, 64), Ok(expected));
}

#[rstest]
fn numeric_uint_saturation() {
    assert_eq!(parse_uint(b"18446744073709551615", 10, 64), Ok(u64::MAX));
    assert_eq!(parse_uint(b"18446744073709551616", 10, 64), Ok(u64::MAX));
    assert_eq!(parse_uint(b"184467440737095516159", 10, 64), Ok(u64::MAX));
}

#[rstest]
#[case(b"7f", 16, 8, Ok(127))]
#[case(b"80", 16, 8, Err(ParseError::OutOfRange { bits: 8 }))]
#[case(b"-8000", 16, 16, Ok(-32768))]
#[case(b"777", 8, 32, Ok(511))]
fn numeric_int_narrow_widths(
    #[case] input: &[u8],
    #[case] base: u32,
    #[case] bits: u32,
    #[case] expected: Result<i64, ParseError>,
) {
    assert_eq!(parse_int(input, base, bits), expected);
}

#[rstest]
#[case(b"", ParseError::Empty)]
#[case(b"-", ParseError::MissingDigits)]
#[case(b"1e", ParseError::InvalidExponent)]
#[case(b"1e+", ParseError::InvalidExponent)]
#[case(b"1ex", ParseError::InvalidExponent)]
#[case(b"1.5.", ParseError::InvalidDigit { byte: b'.', position: 3 })]
fn numeric_float_errors(#[case] input: &[u8], #[case] expected: ParseError) {
    assert_eq!(parse_float(input, 64), Err(expected));
}

#[rstest]
fn numeric_float_render_parse_round_trip() {
    let mut value = 1.0e-12f64;
    while value < 1.0e12 {
        for candidate in [value * 1.37, -value * 2.91] {
            let mut out = Vec::new();
            append_f64(&mut out, candidate, FloatFormat::Fast);
            let parsed = parse_float(&out, 64).unwrap();
            assert!(
                ((parsed - candidate) / candidate).abs() <= 1e-5,
                "{candidate} -> {}",
                String::from_utf8_lossy(&out)
            );
        }
        value *= 10.0;
    }
}

#[rstest]
fn numeric_parse_float_32() {
    let parsed = parse_float(b"1e39", 32).unwrap();
    assert!(parsed.is_infinite());
    let parsed = parse_float(b"1.25", 32).unwrap();
    assert_eq!(parsed, 1.25);
}

fn reencode(input: &[u8]) -> sjson::Result<String> {
    let value = parse_int(input, 10, 32)?;
    sjson::to_string(&value)
}

#[rstest]
fn numeric_parse_errors_join_encode_errors() {
    assert_eq!(reencode(b"-0042").unwrap(), "-42");
    let err = reencode(b"4294967296").unwrap_err();
    assert!(matches!(
        err,
        sjson::Error::Parse(ParseError::OutOfRange { bits: 32 })
    ));
}
