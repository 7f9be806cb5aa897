use crate::constants::EMPTY_STRING;

const fn build_safe_set() -> [bool; 128] {
    let mut table = [false; 128];
    let mut b = 0x20;
    while b < 0x7f {
        table[b] = true;
        b += 1;
    }
    table[b'"' as usize] = false;
    table[b'\\' as usize] = false;
    table
}

const fn build_unicode_escapes() -> [[u8; 6]; 32] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut table = [[0u8; 6]; 32];
    let mut b = 0;
    while b < 32 {
        table[b] = [b'\\', b'u', b'0', b'0', HEX[b >> 4], HEX[b & 0xf]];
        b += 1;
    }
    table
}

/// ASCII bytes that may appear literally inside a JSON string.
static SAFE_SET: [bool; 128] = build_safe_set();

/// `\u00XX` renderings of the C0 control bytes.
static UNICODE_ESCAPES: [[u8; 6]; 32] = build_unicode_escapes();

/// Whether `byte` can be copied into a JSON string without escaping.
///
/// Bytes at or above 0x80 are UTF-8 sequence bytes and always pass through.
#[inline]
pub fn is_safe(byte: u8) -> bool {
    byte >= 0x80 || SAFE_SET[byte as usize]
}

/// Append `text` as a quoted JSON string.
#[inline]
pub fn append_quoted_str(out: &mut Vec<u8>, text: &str) {
    append_quoted(out, text.as_bytes());
}

/// Append `bytes` as a quoted JSON string.
///
/// The input is assumed to be UTF-8; non-ASCII bytes are copied verbatim.
///
/// # Examples
/// ```
/// let mut out = Vec::new();
/// sjson::text::append_quoted(&mut out, b"say \"hi\"\n");
/// assert_eq!(out, br#""say \"hi\"\n""#);
/// ```
pub fn append_quoted(out: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.is_empty() {
        out.extend_from_slice(EMPTY_STRING);
        return;
    }
    out.reserve(bytes.len() + 2);
    out.push(b'"');
    append_escaped(out, bytes);
    out.push(b'"');
}

/// Append the escaped content of a JSON string, without the quotes.
pub fn append_escaped(out: &mut Vec<u8>, bytes: &[u8]) {
    let mut start = 0;
    for (idx, &byte) in bytes.iter().enumerate() {
        if is_safe(byte) {
            continue;
        }
        if start < idx {
            out.extend_from_slice(&bytes[start..idx]);
        }
        push_escape(out, byte);
        start = idx + 1;
    }
    if start < bytes.len() {
        out.extend_from_slice(&bytes[start..]);
    }
}

/// Escape a string into a new, unquoted `String`.
///
/// # Examples
/// ```
/// assert_eq!(sjson::text::escape("tab\there"), "tab\\there");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    append_escaped(&mut out, text.as_bytes());
    // escapes are ASCII and every other byte is copied from valid UTF-8
    String::from_utf8(out).unwrap_or_default()
}

#[inline]
fn push_escape(out: &mut Vec<u8>, byte: u8) {
    match byte {
        b'"' => out.extend_from_slice(b"\\\""),
        b'\\' => out.extend_from_slice(b"\\\\"),
        b'\n' => out.extend_from_slice(b"\\n"),
        b'\r' => out.extend_from_slice(b"\\r"),
        b'\t' => out.extend_from_slice(b"\\t"),
        0x08 => out.extend_from_slice(b"\\b"),
        0x0c => out.extend_from_slice(b"\\f"),
        0x00..=0x1f => out.extend_from_slice(&UNICODE_ESCAPES[byte as usize]),
        // DEL is legal JSON string content
        _ => out.push(byte),
    }
}
