use std::fmt;
use std::sync::OnceLock;

use crate::encode::basic;
use crate::encode::cache::encoder_of;
use crate::encode::map::{HomogeneousMapEncoder, MapEncoder};
use crate::encode::seq::SeqEncoder;
use crate::encode::stream::EncoderStream;
use crate::encode::structs::StructEncoder;
use crate::error::Result;
use crate::types::Encode;

/// How values of one type are rendered.
///
/// Built once per type by [`Encode::build_encoder`] and shared for the rest
/// of the process.
#[derive(Debug)]
pub enum Encoder {
    Null,
    Bool,
    Int,
    Uint,
    Float32,
    Float64,
    String,
    /// Raw bytes as a JSON string.
    Bytes,
    /// A [`MarshalText`](crate::MarshalText) value as a JSON string.
    Fallback,
    /// A nullable reference to a value of the inner type.
    Pointer(LazyEncoder),
    /// Each value picks its encoder from its own view.
    Dynamic,
    Seq(SeqEncoder),
    Struct(StructEncoder),
    /// Map whose values share one statically known encoder.
    HomogeneousMap(HomogeneousMapEncoder),
    /// Map whose values resolve their encoder per entry.
    Map(MapEncoder),
}

impl Encoder {
    /// Append the JSON rendering of `value` to `stream`.
    ///
    /// `value` must be of the type this encoder was built for; a view of the
    /// wrong kind fails with [`Error::TypeMismatch`](crate::Error::TypeMismatch).
    pub fn append(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        match self {
            Encoder::Null => {
                stream.write_null();
                Ok(())
            }
            Encoder::Bool => basic::encode_bool(stream, value),
            Encoder::Int => basic::encode_int(stream, value),
            Encoder::Uint => basic::encode_uint(stream, value),
            Encoder::Float32 => basic::encode_f32(stream, value),
            Encoder::Float64 => basic::encode_f64(stream, value),
            Encoder::String => basic::encode_string(stream, value),
            Encoder::Bytes => basic::encode_bytes(stream, value),
            Encoder::Fallback => basic::encode_fallback(stream, value),
            Encoder::Pointer(inner) => basic::encode_pointer(stream, inner, value),
            Encoder::Dynamic => basic::encode_dynamic(stream, value),
            Encoder::Seq(seq) => seq.encode(stream, value),
            Encoder::Struct(record) => record.encode(stream, value),
            Encoder::HomogeneousMap(map) => map.encode(stream, value),
            Encoder::Map(map) => map.encode(stream, value),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Encoder::Null => "null",
            Encoder::Bool => "bool",
            Encoder::Int => "int",
            Encoder::Uint => "uint",
            Encoder::Float32 => "float32",
            Encoder::Float64 => "float64",
            Encoder::String => "string",
            Encoder::Bytes => "bytes",
            Encoder::Fallback => "text",
            Encoder::Pointer(_) => "pointer",
            Encoder::Dynamic => "dynamic",
            Encoder::Seq(_) => "sequence",
            Encoder::Struct(_) => "struct",
            Encoder::HomogeneousMap(_) => "homogeneous map",
            Encoder::Map(_) => "map",
        }
    }
}

/// A nested type's encoder, looked up on first use.
///
/// Storing the lookup instead of the encoder lets a type refer to itself
/// (`Option<Box<Node>>` inside `Node`) without recursing at build time.
pub struct LazyEncoder {
    resolve: fn() -> &'static Encoder,
    slot: OnceLock<&'static Encoder>,
}

impl LazyEncoder {
    pub fn of<T: Encode>() -> Self {
        Self {
            resolve: encoder_of::<T>,
            slot: OnceLock::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> &'static Encoder {
        let resolve = self.resolve;
        *self.slot.get_or_init(resolve)
    }
}

impl fmt::Debug for LazyEncoder {
    // does not follow the slot: recursive types would print forever
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyEncoder")
            .field("resolved", &self.slot.get().is_some())
            .finish()
    }
}
