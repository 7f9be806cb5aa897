//! Byte-level numeric rendering and parsing.

pub mod format;
pub mod parse;
pub mod sink;

pub use format::{append_f32, append_f64, append_int, append_uint};
pub use parse::{parse_float, parse_int, parse_uint};
pub use sink::DigitSink;
