use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors produced while encoding a value.
///
/// Failures of nested elements are propagated unchanged, so the error a caller
/// sees is the first one raised anywhere in the value tree.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported map key type: {type_name}")]
    UnsupportedKeyType { type_name: &'static str },

    #[error("encoding error for map key: {message:?}")]
    KeyMarshal { message: String },

    #[error("text marshaling failed: {message}")]
    TextMarshal { message: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("encoded output is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lets callers mix the numeric parsers with encoding under one `?`.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub fn key_marshal(message: impl ToString) -> Self {
        Error::KeyMarshal {
            message: message.to_string(),
        }
    }

    pub fn text_marshal(message: impl ToString) -> Self {
        Error::TextMarshal {
            message: message.to_string(),
        }
    }
}

/// Failure of one of the byte-level numeric parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("no digits in numeric literal")]
    MissingDigits,

    #[error("invalid character {byte:#04x} at position {position}")]
    InvalidDigit { byte: u8, position: usize },

    #[error("digit {digit} out of range for base {base}")]
    DigitOutOfBase { digit: u32, base: u32 },

    #[error("unsupported base {0}")]
    InvalidBase(u32),

    #[error("value out of range for {bits}-bit integer")]
    OutOfRange { bits: u32 },

    #[error("malformed exponent")]
    InvalidExponent,
}

pub type Result<T> = std::result::Result<T, Error>;
