//! The value model: how a Rust value describes itself to the encoder.
//!
//! A type implements [`Encode`] once, naming the [`Encoder`] strategy that
//! renders it and exposing each instance as a borrowed [`ValueView`]. The
//! strategy is built once per type and cached; views are cheap and never
//! allocate.

mod impls;
mod json;

use std::borrow::Cow;

use crate::encode::{encoder_of, Encoder};
use crate::error::Result;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type that can be rendered as JSON.
///
/// # Examples
/// ```
/// use sjson::{Encode, Encoder, ValueView};
///
/// struct Celsius(f64);
///
/// impl Encode for Celsius {
///     fn build_encoder() -> Encoder {
///         Encoder::Float64
///     }
///
///     fn view(&self) -> ValueView<'_> {
///         ValueView::F64(self.0)
///     }
/// }
///
/// assert_eq!(sjson::to_string(&Celsius(21.5))?, "21.5");
/// # Ok::<(), sjson::Error>(())
/// ```
pub trait Encode: DynEncode + 'static {
    /// Describe how every value of this type is rendered.
    ///
    /// Called at most once per type and process in the common case; the result
    /// is cached. Nested types must be referenced through
    /// [`LazyEncoder`](crate::encode::LazyEncoder) rather than built eagerly.
    fn build_encoder() -> Encoder
    where
        Self: Sized;

    fn view(&self) -> ValueView<'_>;

    /// Whether this value is the zero value of its type, for `omitempty`.
    fn is_empty_value(&self) -> bool {
        self.view().is_empty_value()
    }

    /// True when each value must pick its encoder at runtime.
    fn is_dynamic() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// Object-safe access to a value's cached encoder.
///
/// Implemented for every [`Encode`] type; lets `&dyn Encode` find the encoder
/// of its concrete type.
pub trait DynEncode {
    fn resolve_encoder(&self) -> &'static Encoder;
    fn type_name(&self) -> &'static str;
}

impl<T: Encode> DynEncode for T {
    #[inline]
    fn resolve_encoder(&self) -> &'static Encoder {
        encoder_of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Types whose JSON form is their text form, rendered as a JSON string.
pub trait MarshalText {
    fn marshal_text(&self) -> std::result::Result<Cow<'_, str>, BoxError>;
}

/// Ordered items of a sequence.
pub trait SeqView {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first_item(&self) -> Option<&dyn Encode>;

    fn for_each_item<'a>(
        &'a self,
        f: &mut dyn FnMut(&'a dyn Encode) -> Result<()>,
    ) -> Result<()>;
}

/// Entries of a mapping.
pub trait MapView {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first_entry(&self) -> Option<(&dyn Encode, &dyn Encode)>;

    fn for_each_entry<'a>(
        &'a self,
        f: &mut dyn FnMut(&'a dyn Encode, &'a dyn Encode) -> Result<()>,
    ) -> Result<()>;
}

/// Field access for records described with a
/// [`StructEncoder`](crate::encode::StructEncoder).
pub trait StructView {
    /// The field registered at `index`, counting in declaration order.
    fn field(&self, index: usize) -> &dyn Encode;
}

/// A borrowed, type-erased look at one value.
#[derive(Clone, Copy)]
pub enum ValueView<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Bytes(&'a [u8]),
    Text(&'a dyn MarshalText),
    /// A nullable reference; `None` renders as `null`.
    Pointer(Option<&'a dyn Encode>),
    Seq(&'a dyn SeqView),
    Map(&'a dyn MapView),
    Struct(&'a dyn StructView),
}

impl ValueView<'_> {
    /// Zero values: `null`, `false`, `0`, empty text, bytes, sequences and
    /// mappings, and absent references. Records and text-marshaled values are
    /// never empty.
    pub fn is_empty_value(&self) -> bool {
        match *self {
            ValueView::Null => true,
            ValueView::Bool(b) => !b,
            ValueView::Int(v) => v == 0,
            ValueView::Uint(v) => v == 0,
            ValueView::F32(v) => v == 0.0,
            ValueView::F64(v) => v == 0.0,
            ValueView::Str(s) => s.is_empty(),
            ValueView::Bytes(b) => b.is_empty(),
            ValueView::Text(_) => false,
            ValueView::Pointer(inner) => inner.is_none(),
            ValueView::Seq(seq) => seq.is_empty(),
            ValueView::Map(map) => map.is_empty(),
            ValueView::Struct(_) => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueView::Null => "null",
            ValueView::Bool(_) => "bool",
            ValueView::Int(_) => "int",
            ValueView::Uint(_) => "uint",
            ValueView::F32(_) => "float32",
            ValueView::F64(_) => "float64",
            ValueView::Str(_) => "string",
            ValueView::Bytes(_) => "bytes",
            ValueView::Text(_) => "text",
            ValueView::Pointer(_) => "pointer",
            ValueView::Seq(_) => "sequence",
            ValueView::Map(_) => "map",
            ValueView::Struct(_) => "struct",
        }
    }
}

/// Raw bytes rendered as a JSON string.
///
/// A plain `Vec<u8>` is a sequence of numbers; wrap it to get a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl Encode for Bytes {
    fn build_encoder() -> Encoder {
        Encoder::Bytes
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::Bytes(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_empty_values() {
        assert!(0i32.is_empty_value());
        assert!(!7u8.is_empty_value());
        assert!(String::new().is_empty_value());
        assert!(false.is_empty_value());
        assert!(0.0f64.is_empty_value());
        assert!(Vec::<i32>::new().is_empty_value());
        assert!(HashMap::<String, i32>::new().is_empty_value());
        assert!(None::<i32>.is_empty_value());
        assert!(Bytes::default().is_empty_value());
    }

    #[rstest]
    fn test_present_reference_is_never_empty() {
        assert!(!Some(0i32).is_empty_value());
        assert!(!Box::new(String::new()).is_empty_value());
    }

    #[rstest]
    fn test_dyn_encode_reports_concrete_type() {
        let value: Box<dyn Encode> = Box::new(5u16);
        assert_eq!((*value).type_name(), "u16");
        assert!(matches!((*value).resolve_encoder(), Encoder::Uint));
        assert!(matches!(value.resolve_encoder(), Encoder::Dynamic));
    }

    #[rstest]
    fn test_kind_names() {
        assert_eq!(ValueView::Str("x").kind_name(), "string");
        assert_eq!(ValueView::Pointer(None).kind_name(), "pointer");
    }
}
