use std::any::type_name;

use crate::constants::{EMPTY_OBJECT, RESERVE_PER_FIELD};
use crate::encode::encoder::{Encoder, LazyEncoder};
use crate::encode::stream::EncoderStream;
use crate::error::{Error, Result};
use crate::text;
use crate::types::{Encode, StructView, ValueView};

/// One field of a record: its rendered key and how to encode its value.
#[derive(Debug)]
pub struct StructField {
    name: &'static str,
    /// `"name":` with the name already escaped.
    prefix: Box<[u8]>,
    index: usize,
    omit_empty: bool,
    encoder: LazyEncoder,
    type_name: &'static str,
}

impl StructField {
    fn new<F: Encode>(name: &'static str, index: usize, omit_empty: bool) -> Self {
        let mut prefix = Vec::with_capacity(name.len() + 3);
        text::append_quoted_str(&mut prefix, name);
        prefix.push(b':');
        Self {
            name,
            prefix: prefix.into_boxed_slice(),
            index,
            omit_empty,
            encoder: LazyEncoder::of::<F>(),
            type_name: type_name::<F>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    fn write(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        stream.write_bytes(&self.prefix);
        self.encoder.get().append(stream, value)
    }
}

/// Renders a record as a JSON object, fields in declaration order.
///
/// Usually produced by [`encode_struct!`](crate::encode_struct); hand-written
/// [`Encode`] impls can use [`StructEncoder::builder`].
///
/// # Examples
/// ```
/// use sjson::encode::StructEncoder;
/// use sjson::{Encode, Encoder, StructView, ValueView};
///
/// struct Point {
///     x: i32,
///     label: Option<String>,
/// }
///
/// impl Encode for Point {
///     fn build_encoder() -> Encoder {
///         StructEncoder::builder::<Self>()
///             .field::<i32>("x")
///             .omit_empty_field::<Option<String>>("label")
///             .build()
///     }
///
///     fn view(&self) -> ValueView<'_> {
///         ValueView::Struct(self)
///     }
/// }
///
/// impl StructView for Point {
///     fn field(&self, index: usize) -> &dyn Encode {
///         match index {
///             0 => &self.x,
///             _ => &self.label,
///         }
///     }
/// }
///
/// let point = Point { x: 3, label: None };
/// assert_eq!(sjson::to_string(&point)?, r#"{"x":3}"#);
/// # Ok::<(), sjson::Error>(())
/// ```
#[derive(Debug)]
pub struct StructEncoder {
    type_name: &'static str,
    fields: Box<[StructField]>,
    has_omit_empty: bool,
    size_hint: usize,
}

impl StructEncoder {
    pub fn builder<T: Encode>() -> StructEncoderBuilder {
        StructEncoderBuilder {
            type_name: type_name::<T>(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn has_omit_empty(&self) -> bool {
        self.has_omit_empty
    }

    /// Bytes reserved before a record is written.
    pub fn size_hint(&self) -> usize {
        self.size_hint
    }

    pub(crate) fn encode(&self, stream: &mut EncoderStream, value: &dyn Encode) -> Result<()> {
        let ValueView::Struct(record) = value.view() else {
            return Err(Error::type_mismatch("struct", value.view().kind_name()));
        };

        match &*self.fields {
            [] => {
                stream.write_bytes(EMPTY_OBJECT);
                Ok(())
            }
            [field] => self.encode_single(stream, field, record),
            fields if self.has_omit_empty => self.encode_omitting(stream, fields, record),
            fields => self.encode_all(stream, fields, record),
        }
    }

    fn encode_single(
        &self,
        stream: &mut EncoderStream,
        field: &StructField,
        record: &dyn StructView,
    ) -> Result<()> {
        let value = record.field(field.index);
        if field.omit_empty && value.is_empty_value() {
            stream.write_bytes(EMPTY_OBJECT);
            return Ok(());
        }
        stream.reserve(self.size_hint);
        stream.write_byte(b'{');
        field.write(stream, value)?;
        stream.write_byte(b'}');
        Ok(())
    }

    fn encode_all(
        &self,
        stream: &mut EncoderStream,
        fields: &[StructField],
        record: &dyn StructView,
    ) -> Result<()> {
        stream.reserve(self.size_hint);
        stream.write_byte(b'{');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                stream.write_byte(b',');
            }
            field.write(stream, record.field(field.index))?;
        }
        stream.write_byte(b'}');
        Ok(())
    }

    fn encode_omitting(
        &self,
        stream: &mut EncoderStream,
        fields: &[StructField],
        record: &dyn StructView,
    ) -> Result<()> {
        stream.reserve(self.size_hint);
        stream.write_byte(b'{');
        let mut first = true;
        for field in fields {
            let value = record.field(field.index);
            if field.omit_empty && value.is_empty_value() {
                continue;
            }
            if !first {
                stream.write_byte(b',');
            }
            first = false;
            field.write(stream, value)?;
        }
        stream.write_byte(b'}');
        Ok(())
    }
}

/// Collects field descriptions in declaration order.
pub struct StructEncoderBuilder {
    type_name: &'static str,
    fields: Vec<StructField>,
}

impl StructEncoderBuilder {
    /// Add a field that is always emitted.
    pub fn field<F: Encode>(mut self, name: &'static str) -> Self {
        let index = self.fields.len();
        self.fields.push(StructField::new::<F>(name, index, false));
        self
    }

    /// Add a field that is skipped when its value is empty.
    pub fn omit_empty_field<F: Encode>(mut self, name: &'static str) -> Self {
        let index = self.fields.len();
        self.fields.push(StructField::new::<F>(name, index, true));
        self
    }

    pub fn finish(self) -> StructEncoder {
        let has_omit_empty = self.fields.iter().any(|f| f.omit_empty);
        let size_hint = 2 + self
            .fields
            .iter()
            .map(|f| f.prefix.len() + RESERVE_PER_FIELD)
            .sum::<usize>();
        StructEncoder {
            type_name: self.type_name,
            fields: self.fields.into_boxed_slice(),
            has_omit_empty,
            size_hint,
        }
    }

    pub fn build(self) -> Encoder {
        Encoder::Struct(self.finish())
    }
}
