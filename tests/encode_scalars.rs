use std::borrow::Cow;
use std::net::{IpAddr, Ipv6Addr};
use std::sync::Arc;

use rstest::rstest;
use serde_json::{json, Value};
use sjson::num::{parse_float, parse_int, parse_uint};
use sjson::{Bytes, Config, Encode, Error, FloatFormat};

fn encode<T: Encode>(value: &T) -> String {
    sjson::to_string(value).expect("encode failed")
}

#[rstest]
#[case(true, "true")]
#[case(false, "false")]
fn scalars_bool(#[case] value: bool, #[case] expected: &str) {
    assert_eq!(encode(&value), expected);
}

#[rstest]
fn scalars_unit_is_null() {
    assert_eq!(encode(&()), "null");
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(9)]
#[case(9_999)]
#[case(-10_000)]
#[case(99_999_999)]
#[case(100_000_000)]
#[case(i64::MAX)]
#[case(i64::MIN)]
fn scalars_int_round_trip(#[case] value: i64) {
    let rendered = encode(&value);
    assert_eq!(rendered, value.to_string());
    assert_eq!(parse_int(rendered.as_bytes(), 10, 64), Ok(value));
}

#[rstest]
#[case(0)]
#[case(10_000)]
#[case(12_345_678)]
#[case(u64::MAX)]
fn scalars_uint_round_trip(#[case] value: u64) {
    let rendered = encode(&value);
    assert_eq!(rendered, value.to_string());
    assert_eq!(parse_uint(rendered.as_bytes(), 10, 64), Ok(value));
}

#[rstest]
fn scalars_integer_boundaries() {
    assert_eq!(encode(&i64::MIN), "-9223372036854775808");
    assert_eq!(encode(&u64::MAX), "18446744073709551615");
    assert_eq!(encode(&i8::MIN), "-128");
    assert_eq!(encode(&u16::MAX), "65535");
}

#[rstest]
#[case(0.1)]
#[case(-2.5)]
#[case(3.141592653589793)]
#[case(1234567.891)]
#[case(6.02214076e23)]
#[case(1.602e-19)]
#[case(-0.000123)]
fn scalars_float_round_trip_within_six_digits(#[case] value: f64) {
    let rendered = encode(&value);
    let parsed = parse_float(rendered.as_bytes(), 64).expect("parse failed");
    assert!(
        ((parsed - value) / value).abs() <= 1e-5,
        "{value} rendered as {rendered}"
    );
    let reference: f64 = serde_json::from_str(&rendered).expect("not valid JSON");
    assert!(((reference - value) / value).abs() <= 1e-5);
}

#[rstest]
#[case(100.0, "100")]
#[case(-7.0, "-7")]
#[case(1e18, "1000000000000000000")]
#[case(1e19, "1e+19")]
#[case(1234567.891, "1.23457e+06")]
#[case(0.000012345, "1.2345e-05")]
fn scalars_float_text(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(encode(&value), expected);
}

#[rstest]
fn scalars_shortest_float_format() {
    let config = Config::new().with_float_format(FloatFormat::Shortest);
    let rendered = sjson::to_string_with_config(&0.1234567f64, config).unwrap();
    assert_eq!(rendered, "0.1234567");
    assert_eq!(encode(&0.1234567f64), "0.123457");
}

#[rstest]
fn scalars_non_finite_floats_are_null() {
    assert_eq!(encode(&f64::NAN), "null");
    assert_eq!(encode(&vec![f32::INFINITY]), "[null]");
}

#[rstest]
#[case("")]
#[case("plain ascii")]
#[case("tab\tnewline\nreturn\r")]
#[case("quote \" backslash \\")]
#[case("\u{0}\u{1}\u{1f}")]
#[case("unicode: ü ß 漢字 🎉")]
fn scalars_strings_are_valid_json(#[case] text: &str) {
    let rendered = encode(&text.to_string());
    let parsed: String = serde_json::from_str(&rendered).expect("not valid JSON");
    assert_eq!(parsed, text);
    for byte in rendered[1..rendered.len() - 1].bytes() {
        assert!(byte >= 0x20, "raw control byte in {rendered:?}");
    }
}

#[rstest]
fn scalars_string_flavours_agree() {
    let expected = r#""a\"b""#;
    assert_eq!(encode(&"a\"b"), expected);
    assert_eq!(encode(&String::from("a\"b")), expected);
    assert_eq!(encode(&Box::<str>::from("a\"b")), expected);
    assert_eq!(encode(&Cow::<'static, str>::Borrowed("a\"b")), expected);
}

#[rstest]
fn scalars_bytes() {
    assert_eq!(encode(&Bytes(b"raw\x01".to_vec())), r#""raw\u0001""#);
    assert_eq!(encode(&Bytes::default()), r#""""#);
    assert_eq!(encode(&None::<Bytes>), "null");
}

#[rstest]
fn scalars_invalid_utf8_bytes_fail_string_output_only() {
    let value = Bytes(vec![0xff, 0xfe]);
    assert!(matches!(sjson::to_string(&value), Err(Error::Utf8(_))));
    assert_eq!(sjson::to_vec(&value).unwrap(), b"\"\xff\xfe\"");
}

#[rstest]
fn scalars_references() {
    assert_eq!(encode(&None::<i32>), "null");
    assert_eq!(encode(&Some(5i32)), "5");
    assert_eq!(encode(&Box::new(Some(false))), "false");
    assert_eq!(encode(&Arc::new("shared")), r#""shared""#);
}

#[rstest]
fn scalars_text_marshaled_values() {
    assert_eq!(encode(&'x'), r#""x""#);
    assert_eq!(encode(&'"'), r#""\"""#);
    let addr = IpAddr::V6(Ipv6Addr::LOCALHOST);
    assert_eq!(encode(&addr), r#""::1""#);
}

#[rstest]
#[case(json!(null))]
#[case(json!(1))]
#[case(json!(-1))]
#[case(json!(u64::MAX))]
#[case(json!("text"))]
#[case(json!([1, "two", null, [true]]))]
#[case(json!({"nested": {"list": [1, 2], "empty": {}}}))]
fn scalars_json_values_round_trip(#[case] value: Value) {
    let rendered = encode(&value);
    let parsed: Value = serde_json::from_str(&rendered).expect("not valid JSON");
    assert_eq!(parsed, value);
}

#[rstest]
fn scalars_writer_output() {
    let mut out = Vec::new();
    sjson::to_writer(&mut out, &json!({"a": [1, 2]})).unwrap();
    assert_eq!(out, br#"{"a":[1,2]}"#);
}
