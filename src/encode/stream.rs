use crate::constants::{DEFAULT_STREAM_CAPACITY, FALSE, NULL, TRUE};
use crate::num;
use crate::options::Config;
use crate::text;

/// The byte sink every encoder appends to during one call.
///
/// Owned exclusively by a single encode call between pool acquire and release.
pub struct EncoderStream {
    buffer: Vec<u8>,
    config: Config,
}

impl EncoderStream {
    pub fn new(config: Config) -> Self {
        Self::with_capacity(DEFAULT_STREAM_CAPACITY, config)
    }

    pub fn with_capacity(capacity: usize, config: Config) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Drop the content, keeping the allocation.
    pub(crate) fn reset(&mut self) {
        self.buffer.clear();
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    #[inline]
    pub fn write_null(&mut self) {
        self.write_bytes(NULL);
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_bytes(if value { TRUE } else { FALSE });
    }

    #[inline]
    pub fn write_int(&mut self, value: i64) {
        num::append_int(&mut self.buffer, value);
    }

    #[inline]
    pub fn write_uint(&mut self, value: u64) {
        num::append_uint(&mut self.buffer, value);
    }

    pub fn write_f32(&mut self, value: f32) {
        num::append_f32(&mut self.buffer, value, self.config.float_format);
    }

    pub fn write_f64(&mut self, value: f64) {
        num::append_f64(&mut self.buffer, value, self.config.float_format);
    }

    /// Write a quoted, escaped JSON string.
    #[inline]
    pub fn write_str(&mut self, value: &str) {
        text::append_quoted(&mut self.buffer, value.as_bytes());
    }

    #[inline]
    pub fn write_quoted_bytes(&mut self, value: &[u8]) {
        text::append_quoted(&mut self.buffer, value);
    }

    /// Write an object key (quoted, escaped) and its `:` separator.
    #[inline]
    pub fn write_key(&mut self, key: &[u8]) {
        text::append_quoted(&mut self.buffer, key);
        self.buffer.push(b':');
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::options::FloatFormat;

    #[rstest]
    fn test_scalar_writers() {
        let mut stream = EncoderStream::new(Config::default());
        stream.write_byte(b'[');
        stream.write_null();
        stream.write_byte(b',');
        stream.write_bool(true);
        stream.write_byte(b',');
        stream.write_int(-7);
        stream.write_byte(b',');
        stream.write_f64(0.25);
        stream.write_byte(b',');
        stream.write_str("x\"y");
        stream.write_byte(b']');
        assert_eq!(stream.as_bytes(), br#"[null,true,-7,0.25,"x\"y"]"#);
    }

    #[rstest]
    fn test_key_writer() {
        let mut stream = EncoderStream::new(Config::default());
        stream.write_key(b"a\tb");
        assert_eq!(stream.as_bytes(), br#""a\tb":"#);
    }

    #[rstest]
    fn test_float_format_follows_config() {
        let config = Config::new().with_float_format(FloatFormat::Shortest);
        let mut stream = EncoderStream::new(config);
        stream.write_f64(0.1234567);
        assert_eq!(stream.as_bytes(), b"0.1234567");
    }

    #[rstest]
    fn test_reset_keeps_capacity() {
        let mut stream = EncoderStream::with_capacity(64, Config::default());
        stream.write_bytes(b"abc");
        stream.reset();
        assert!(stream.is_empty());
        assert!(stream.capacity() >= 64);
    }
}
