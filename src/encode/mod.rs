//! The encode pipeline: a pooled stream, the cached per-type [`Encoder`]
//! strategies, and the entry points that tie them together.

mod basic;
mod cache;
mod encoder;
pub(crate) mod map;
pub mod pool;
mod seq;
mod stream;
mod structs;

use std::io::Write;

pub use cache::{cached_encoder_count, encoder_of, is_cached};
pub use encoder::{Encoder, LazyEncoder};
pub use map::{map_encoder, HomogeneousMapEncoder, KeyBytes, KeyEncoder, MapEncoder};
pub use seq::SeqEncoder;
pub use stream::EncoderStream;
pub use structs::{StructEncoder, StructEncoderBuilder, StructField};

use crate::constants::{
    ESTIMATE_DEFAULT, ESTIMATE_PER_MAP_ENTRY, ESTIMATE_PER_SEQ_ITEM,
    ESTIMATE_PER_STRING_ITEM, ESTIMATE_PER_STRING_MAP_ENTRY, ESTIMATE_STRING_OVERHEAD,
};
use crate::error::Result;
use crate::options::Config;
use crate::types::{Encode, ValueView};

/// Encode `value` into a fresh byte vector.
///
/// The work happens in a stream borrowed from the current thread's pool; the
/// result is copied out so it never aliases pooled storage. The stream goes
/// back to the pool on every exit path.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use sjson::{encode, Config};
///
/// let scores: HashMap<&str, u32> = [("b", 2), ("a", 1)].into_iter().collect();
/// let bytes = encode::encode(&scores, Config::new().with_sort_map_keys(true))?;
/// assert_eq!(bytes, br#"{"a":1,"b":2}"#);
/// # Ok::<(), sjson::Error>(())
/// ```
pub fn encode<T: Encode>(value: &T, config: Config) -> Result<Vec<u8>> {
    let mut stream = pool::acquire(estimate_size(value.view()), config);
    encoder_of::<T>().append(&mut stream, value)?;
    Ok(stream.as_bytes().to_vec())
}

/// Encode `value` and write the bytes to `writer` straight from the pooled
/// stream.
pub fn encode_to_writer<T: Encode, W: Write>(
    mut writer: W,
    value: &T,
    config: Config,
) -> Result<()> {
    let mut stream = pool::acquire(estimate_size(value.view()), config);
    encoder_of::<T>().append(&mut stream, value)?;
    writer.write_all(stream.as_bytes())?;
    Ok(())
}

/// A cheap guess at the encoded size of a root value, from its shape only.
///
/// Containers whose first element is text use the smaller per-entry sizes.
pub fn estimate_size(view: ValueView<'_>) -> usize {
    match view {
        ValueView::Map(entries) => match entries.first_entry().map(|(_, v)| v.view()) {
            Some(ValueView::Str(_)) => entries.len() * ESTIMATE_PER_STRING_MAP_ENTRY,
            _ => entries.len() * ESTIMATE_PER_MAP_ENTRY,
        },
        ValueView::Seq(items) => match items.first_item().map(|item| item.view()) {
            Some(ValueView::Str(_)) => items.len() * ESTIMATE_PER_STRING_ITEM,
            _ => items.len() * ESTIMATE_PER_SEQ_ITEM,
        },
        ValueView::Str(s) => s.len() + ESTIMATE_STRING_OVERHEAD,
        ValueView::Bytes(b) => b.len() + ESTIMATE_STRING_OVERHEAD,
        ValueView::Pointer(Some(inner)) => estimate_size(inner.view()),
        _ => ESTIMATE_DEFAULT,
    }
}
