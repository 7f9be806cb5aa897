use std::borrow::Cow;

use crate::encode::encoder::LazyEncoder;
use crate::encode::map::{self, KeyEncoder};
use crate::encode::seq;
use crate::encode::stream::EncoderStream;
use crate::error::{Error, Result};
use crate::types::{Encode, MarshalText, ValueView};

#[inline]
fn mismatch(expected: &'static str, found: ValueView<'_>) -> Error {
    Error::type_mismatch(expected, found.kind_name())
}

pub(crate) fn encode_bool(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Bool(b) => {
            stream.write_bool(b);
            Ok(())
        }
        other => Err(mismatch("bool", other)),
    }
}

pub(crate) fn encode_int(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Int(v) => {
            stream.write_int(v);
            Ok(())
        }
        other => Err(mismatch("int", other)),
    }
}

pub(crate) fn encode_uint(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Uint(v) => {
            stream.write_uint(v);
            Ok(())
        }
        other => Err(mismatch("uint", other)),
    }
}

pub(crate) fn encode_f32(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::F32(v) => {
            stream.write_f32(v);
            Ok(())
        }
        other => Err(mismatch("float32", other)),
    }
}

pub(crate) fn encode_f64(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::F64(v) => {
            stream.write_f64(v);
            Ok(())
        }
        other => Err(mismatch("float64", other)),
    }
}

pub(crate) fn encode_string(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Str(s) => {
            stream.write_str(s);
            Ok(())
        }
        other => Err(mismatch("string", other)),
    }
}

pub(crate) fn encode_bytes(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Bytes(b) => {
            stream.write_quoted_bytes(b);
            Ok(())
        }
        other => Err(mismatch("bytes", other)),
    }
}

pub(crate) fn encode_fallback(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Text(text) => write_text(stream, text),
        other => Err(mismatch("text", other)),
    }
}

fn write_text(stream: &mut EncoderStream, text: &dyn MarshalText) -> Result<()> {
    let rendered: Cow<'_, str> = text.marshal_text().map_err(Error::text_marshal)?;
    stream.write_str(&rendered);
    Ok(())
}

pub(crate) fn encode_pointer(
    stream: &mut EncoderStream,
    inner: &LazyEncoder,
    value: &dyn Encode,
) -> Result<()> {
    match value.view() {
        ValueView::Pointer(None) => {
            stream.write_null();
            Ok(())
        }
        ValueView::Pointer(Some(target)) => inner.get().append(stream, target),
        other => Err(mismatch("pointer", other)),
    }
}

/// Render a value whose type is only known at runtime.
///
/// References are followed to the referent's own cached encoder; sequences
/// and maps resolve every element that way. Records need a static
/// description and are rejected.
pub(crate) fn encode_dynamic(stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
    match value.view() {
        ValueView::Null | ValueView::Pointer(None) => stream.write_null(),
        ValueView::Bool(b) => stream.write_bool(b),
        ValueView::Int(v) => stream.write_int(v),
        ValueView::Uint(v) => stream.write_uint(v),
        ValueView::F32(v) => stream.write_f32(v),
        ValueView::F64(v) => stream.write_f64(v),
        ValueView::Str(s) => stream.write_str(s),
        ValueView::Bytes(b) => stream.write_quoted_bytes(b),
        ValueView::Text(text) => return write_text(stream, text),
        ValueView::Pointer(Some(target)) => {
            return target.resolve_encoder().append(stream, target);
        }
        ValueView::Seq(items) => {
            return seq::encode_items(stream, items, |item| item.resolve_encoder());
        }
        ValueView::Map(entries) => {
            return map::encode_entries(
                stream,
                entries,
                |key| KeyEncoder::from_encoder(key.resolve_encoder(), key.type_name()).resolve(key),
                |value| value.resolve_encoder(),
            );
        }
        other @ ValueView::Struct(_) => return Err(mismatch("dynamic value", other)),
    }
    Ok(())
}
