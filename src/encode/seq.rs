use crate::constants::EMPTY_ARRAY;
use crate::encode::encoder::{Encoder, LazyEncoder};
use crate::encode::stream::EncoderStream;
use crate::error::{Error, Result};
use crate::types::{Encode, SeqView, ValueView};

/// Renders a homogeneous sequence with its element type's cached encoder.
#[derive(Debug)]
pub struct SeqEncoder {
    element: LazyEncoder,
}

impl SeqEncoder {
    pub fn of<T: Encode>() -> Self {
        Self {
            element: LazyEncoder::of::<T>(),
        }
    }

    pub(crate) fn encode(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        let ValueView::Seq(items) = value.view() else {
            return Err(Error::type_mismatch("sequence", value.view().kind_name()));
        };
        let element = self.element.get();
        encode_items(stream, items, |_| element)
    }
}

/// Write `items` as a JSON array, asking `encoder_for` how to render each one.
pub(crate) fn encode_items<'a>(
    stream: &mut EncoderStream,
    items: &'a dyn SeqView,
    encoder_for: impl Fn(&'a dyn Encode) -> &'static Encoder,
) -> Result<()> {
    if items.is_empty() {
        stream.write_bytes(EMPTY_ARRAY);
        return Ok(());
    }

    stream.write_byte(b'[');
    let mut first = true;
    items.for_each_item(&mut |item| {
        if !first {
            stream.write_byte(b',');
        }
        first = false;
        encoder_for(item).append(stream, item)
    })?;
    stream.write_byte(b']');
    Ok(())
}
