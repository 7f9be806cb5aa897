use std::any::type_name;
use std::borrow::Cow;
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::constants::{EMPTY_OBJECT, RESERVE_PER_MAP_ENTRY};
use crate::encode::cache::encoder_of;
use crate::encode::encoder::{Encoder, LazyEncoder};
use crate::encode::pool;
use crate::encode::stream::EncoderStream;
use crate::error::{Error, Result};
use crate::num;
use crate::types::{Encode, MapView, MarshalText, ValueView};

/// Pick the map strategy for a `K -> V` mapping.
///
/// Values of a dynamic type resolve their encoder per entry; every other
/// value type shares one cached encoder.
pub fn map_encoder<K: Encode, V: Encode>() -> Encoder {
    if V::is_dynamic() {
        Encoder::Map(MapEncoder::new::<K>())
    } else {
        Encoder::HomogeneousMap(HomogeneousMapEncoder::new::<K, V>())
    }
}

/// How a key type becomes the text of a JSON object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoder {
    /// String keys, used as-is.
    Text,
    Int,
    Uint,
    /// Keys rendered through [`MarshalText`].
    Marshal,
    /// Optional [`MarshalText`] keys; an absent key renders as `""`.
    NullableMarshal,
    /// Names the key type so the error can report it.
    Unsupported(&'static str),
}

impl KeyEncoder {
    pub fn for_type<K: Encode>() -> Self {
        Self::from_encoder(encoder_of::<K>(), type_name::<K>())
    }

    pub fn from_encoder(encoder: &Encoder, type_name: &'static str) -> Self {
        match encoder {
            Encoder::String => KeyEncoder::Text,
            Encoder::Int => KeyEncoder::Int,
            Encoder::Uint => KeyEncoder::Uint,
            Encoder::Fallback => KeyEncoder::Marshal,
            Encoder::Pointer(inner) if matches!(inner.get(), Encoder::Fallback) => {
                KeyEncoder::NullableMarshal
            }
            _ => KeyEncoder::Unsupported(type_name),
        }
    }

    /// Render `key` to the bytes written between the key's quotes.
    pub fn resolve<'a>(&self, key: &'a dyn Encode) -> Result<KeyBytes<'a>> {
        match (*self, key.view()) {
            (KeyEncoder::Unsupported(type_name), _) => Err(Error::UnsupportedKeyType { type_name }),
            (KeyEncoder::Text, ValueView::Str(s)) => Ok(KeyBytes::Borrowed(s.as_bytes())),
            (KeyEncoder::Int, ValueView::Int(v)) => {
                let mut digits = SmallVec::new();
                num::append_int(&mut digits, v);
                Ok(KeyBytes::Inline(digits))
            }
            (KeyEncoder::Uint, ValueView::Uint(v)) => {
                let mut digits = SmallVec::new();
                num::append_uint(&mut digits, v);
                Ok(KeyBytes::Inline(digits))
            }
            (KeyEncoder::Marshal, ValueView::Text(text)) => marshal_key(text),
            (KeyEncoder::NullableMarshal, ValueView::Pointer(None)) => {
                Ok(KeyBytes::Borrowed(b""))
            }
            (KeyEncoder::NullableMarshal, ValueView::Pointer(Some(inner))) => {
                match inner.view() {
                    ValueView::Text(text) => marshal_key(text),
                    other => Err(Error::type_mismatch("text", other.kind_name())),
                }
            }
            (expected, found) => Err(Error::type_mismatch(expected.kind_name(), found.kind_name())),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            KeyEncoder::Text => "string",
            KeyEncoder::Int => "int",
            KeyEncoder::Uint => "uint",
            KeyEncoder::Marshal => "text",
            KeyEncoder::NullableMarshal => "pointer",
            KeyEncoder::Unsupported(name) => *name,
        }
    }
}

fn marshal_key(text: &dyn MarshalText) -> Result<KeyBytes<'_>> {
    match text.marshal_text().map_err(Error::key_marshal)? {
        Cow::Borrowed(s) => Ok(KeyBytes::Borrowed(s.as_bytes())),
        Cow::Owned(s) => Ok(KeyBytes::Heap(s.into_bytes())),
    }
}

/// Unquoted, unescaped key text.
#[derive(Debug, Clone)]
pub enum KeyBytes<'a> {
    Borrowed(&'a [u8]),
    /// Rendered integers; 24 bytes fit any i64/u64.
    Inline(SmallVec<[u8; 24]>),
    Heap(Vec<u8>),
}

impl KeyBytes<'_> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            KeyBytes::Borrowed(bytes) => bytes,
            KeyBytes::Inline(bytes) => bytes,
            KeyBytes::Heap(bytes) => bytes,
        }
    }
}

/// A resolved key paired with its value, collected for sorting.
pub(crate) struct SortEntry<'a> {
    key: KeyBytes<'a>,
    value: &'a dyn Encode,
}

/// Key strategy resolved on first use of the map type.
#[derive(Debug)]
struct LazyKey {
    resolve: fn() -> KeyEncoder,
    slot: OnceLock<KeyEncoder>,
}

impl LazyKey {
    fn of<K: Encode>() -> Self {
        Self {
            resolve: KeyEncoder::for_type::<K>,
            slot: OnceLock::new(),
        }
    }

    #[inline]
    fn get(&self) -> KeyEncoder {
        let resolve = self.resolve;
        *self.slot.get_or_init(resolve)
    }
}

/// Map whose values all share one cached encoder.
#[derive(Debug)]
pub struct HomogeneousMapEncoder {
    key: LazyKey,
    value: LazyEncoder,
}

impl HomogeneousMapEncoder {
    pub fn new<K: Encode, V: Encode>() -> Self {
        Self {
            key: LazyKey::of::<K>(),
            value: LazyEncoder::of::<V>(),
        }
    }

    pub fn key_encoder(&self) -> KeyEncoder {
        self.key.get()
    }

    pub(crate) fn encode(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        let ValueView::Map(entries) = value.view() else {
            return Err(Error::type_mismatch("map", value.view().kind_name()));
        };
        let key = self.key.get();
        let value_encoder = self.value.get();
        encode_entries(stream, entries, |k| key.resolve(k), |_| value_encoder)
    }
}

/// Map whose values pick their encoder per entry.
#[derive(Debug)]
pub struct MapEncoder {
    key: LazyKey,
}

impl MapEncoder {
    pub fn new<K: Encode>() -> Self {
        Self {
            key: LazyKey::of::<K>(),
        }
    }

    pub fn key_encoder(&self) -> KeyEncoder {
        self.key.get()
    }

    pub(crate) fn encode(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        let ValueView::Map(entries) = value.view() else {
            return Err(Error::type_mismatch("map", value.view().kind_name()));
        };
        let key = self.key.get();
        encode_entries(stream, entries, |k| key.resolve(k), |v| v.resolve_encoder())
    }
}

/// Write `entries` as a JSON object.
///
/// Sorted-key mode orders entries by the bytes of their resolved keys;
/// otherwise the mapping's own iteration order is kept.
pub(crate) fn encode_entries<'a>(
    stream: &mut EncoderStream,
    entries: &'a dyn MapView,
    resolve_key: impl Fn(&'a dyn Encode) -> Result<KeyBytes<'a>>,
    encoder_for: impl Fn(&'a dyn Encode) -> &'static Encoder,
) -> Result<()> {
    let len = entries.len();
    if len == 0 {
        stream.write_bytes(EMPTY_OBJECT);
        return Ok(());
    }

    stream.reserve(len * RESERVE_PER_MAP_ENTRY);
    stream.write_byte(b'{');

    if len == 1 {
        if let Some((key, value)) = entries.first_entry() {
            let key = resolve_key(key)?;
            stream.write_key(key.as_bytes());
            encoder_for(value).append(stream, value)?;
        }
    } else if stream.config().sort_map_keys {
        let mut sorted: Vec<SortEntry<'a>> = pool::take_scratch(len);
        let collected = entries.for_each_entry(&mut |key, value| {
            sorted.push(SortEntry {
                key: resolve_key(key)?,
                value,
            });
            Ok(())
        });
        let result = collected.and_then(|()| {
            sorted.sort_unstable_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
            for (i, entry) in sorted.iter().enumerate() {
                if i > 0 {
                    stream.write_byte(b',');
                }
                stream.write_key(entry.key.as_bytes());
                encoder_for(entry.value).append(stream, entry.value)?;
            }
            Ok(())
        });
        // returned on failure too
        pool::put_scratch(sorted);
        result?;
    } else {
        let mut first = true;
        entries.for_each_entry(&mut |key, value| {
            if !first {
                stream.write_byte(b',');
            }
            first = false;
            let key = resolve_key(key)?;
            stream.write_key(key.as_bytes());
            encoder_for(value).append(stream, value)
        })?;
    }

    stream.write_byte(b'}');
    Ok(())
}
