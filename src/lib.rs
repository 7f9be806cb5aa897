//! Allocation-lean JSON encoding.
//!
//! Types describe themselves once through [`Encode`]; the resulting
//! [`Encoder`] is cached per type for the life of the process, and every call
//! renders into a stream recycled from a thread-local pool.

pub mod constants;
pub mod encode;
pub mod error;
mod macros;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

use std::io::Write;

pub use crate::encode::{Encoder, EncoderStream, LazyEncoder, StructEncoder};
pub use crate::error::{Error, ParseError, Result};
pub use crate::options::{Config, FloatFormat};
pub use crate::types::{
    BoxError, Bytes, DynEncode, Encode, MapView, MarshalText, SeqView, StructView, ValueView,
};

pub fn to_vec<T: Encode>(value: &T) -> Result<Vec<u8>> {
    to_vec_with_config(value, Config::default())
}

pub fn to_vec_with_config<T: Encode>(value: &T, config: Config) -> Result<Vec<u8>> {
    encode::encode(value, config)
}

/// Encode `value` as a `String`.
///
/// Fails with [`Error::Utf8`] only when a [`Bytes`] payload was not UTF-8.
///
/// # Examples
/// ```
/// assert_eq!(sjson::to_string(&vec![Some(1.5f64), None])?, "[1.5,null]");
/// # Ok::<(), sjson::Error>(())
/// ```
pub fn to_string<T: Encode>(value: &T) -> Result<String> {
    to_string_with_config(value, Config::default())
}

pub fn to_string_with_config<T: Encode>(value: &T, config: Config) -> Result<String> {
    let bytes = encode::encode(value, config)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn to_writer<T: Encode, W: Write>(writer: W, value: &T) -> Result<()> {
    to_writer_with_config(writer, value, Config::default())
}

pub fn to_writer_with_config<T: Encode, W: Write>(
    writer: W,
    value: &T,
    config: Config,
) -> Result<()> {
    encode::encode_to_writer(writer, value, config)
}
