use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use super::{BoxError, Encode, MapView, MarshalText, SeqView, ValueView};
use crate::encode::{map_encoder, Encoder, LazyEncoder, SeqEncoder};
use crate::error::Result;

impl Encode for () {
    fn build_encoder() -> Encoder {
        Encoder::Null
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::Null
    }
}

impl Encode for bool {
    fn build_encoder() -> Encoder {
        Encoder::Bool
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::Bool(*self)
    }
}

macro_rules! impl_encode_signed {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn build_encoder() -> Encoder {
                Encoder::Int
            }

            #[inline]
            fn view(&self) -> ValueView<'_> {
                ValueView::Int(*self as i64)
            }

            fn is_empty_value(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

macro_rules! impl_encode_unsigned {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn build_encoder() -> Encoder {
                Encoder::Uint
            }

            #[inline]
            fn view(&self) -> ValueView<'_> {
                ValueView::Uint(*self as u64)
            }

            fn is_empty_value(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

impl_encode_signed!(i8, i16, i32, i64, isize);
impl_encode_unsigned!(u8, u16, u32, u64, usize);

impl Encode for f32 {
    fn build_encoder() -> Encoder {
        Encoder::Float32
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::F32(*self)
    }
}

impl Encode for f64 {
    fn build_encoder() -> Encoder {
        Encoder::Float64
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::F64(*self)
    }
}

macro_rules! impl_encode_str {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn build_encoder() -> Encoder {
                Encoder::String
            }

            #[inline]
            fn view(&self) -> ValueView<'_> {
                ValueView::Str(self)
            }
        }
    )*};
}

impl_encode_str!(String, &'static str, Box<str>, Cow<'static, str>);

impl MarshalText for char {
    fn marshal_text(&self) -> std::result::Result<Cow<'_, str>, BoxError> {
        Ok(Cow::Owned(self.to_string()))
    }
}

macro_rules! impl_marshal_display {
    ($($ty:ty),*) => {$(
        impl MarshalText for $ty {
            fn marshal_text(&self) -> std::result::Result<Cow<'_, str>, BoxError> {
                Ok(Cow::Owned(self.to_string()))
            }
        }
    )*};
}

impl_marshal_display!(IpAddr, Ipv4Addr, Ipv6Addr);

crate::encode_as_text!(char, IpAddr, Ipv4Addr, Ipv6Addr);

impl<T: Encode> Encode for Option<T> {
    fn build_encoder() -> Encoder {
        Encoder::Pointer(LazyEncoder::of::<T>())
    }

    #[inline]
    fn view(&self) -> ValueView<'_> {
        ValueView::Pointer(self.as_ref().map(|v| v as &dyn Encode))
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_encode_owning_pointer {
    ($($ptr:ident),*) => {$(
        impl<T: Encode> Encode for $ptr<T> {
            fn build_encoder() -> Encoder {
                Encoder::Pointer(LazyEncoder::of::<T>())
            }

            #[inline]
            fn view(&self) -> ValueView<'_> {
                ValueView::Pointer(Some(&**self as &dyn Encode))
            }

            fn is_empty_value(&self) -> bool {
                false
            }
        }
    )*};
}

impl_encode_owning_pointer!(Box, Arc);

impl Encode for Box<dyn Encode> {
    fn build_encoder() -> Encoder {
        Encoder::Dynamic
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::Pointer(Some(&**self))
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn is_dynamic() -> bool {
        true
    }
}

macro_rules! impl_encode_seq {
    ($([$($generics:tt)*] $ty:ty => |$this:ident| $iter:expr),* $(,)?) => {$(
        impl<$($generics)*> SeqView for $ty {
            fn len(&self) -> usize {
                let $this = self;
                ExactSizeIterator::len(&$iter)
            }

            fn first_item(&self) -> Option<&dyn Encode> {
                let $this = self;
                let mut items = $iter;
                items.next().map(|item| item as &dyn Encode)
            }

            fn for_each_item<'a>(
                &'a self,
                f: &mut dyn FnMut(&'a dyn Encode) -> Result<()>,
            ) -> Result<()> {
                let $this = self;
                for item in $iter {
                    f(item)?;
                }
                Ok(())
            }
        }

        impl<$($generics)*> Encode for $ty {
            fn build_encoder() -> Encoder {
                Encoder::Seq(SeqEncoder::of::<T>())
            }

            #[inline]
            fn view(&self) -> ValueView<'_> {
                ValueView::Seq(self)
            }
        }
    )*};
}

impl_encode_seq!(
    [T: Encode] Vec<T> => |this| this.iter(),
    [T: Encode] VecDeque<T> => |this| this.iter(),
    [T: Encode] Box<[T]> => |this| this.iter(),
    [T: Encode, const N: usize] [T; N] => |this| this.iter(),
);

impl<K, V, S> MapView for HashMap<K, V, S>
where
    K: Encode,
    V: Encode,
    S: BuildHasher + 'static,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn first_entry(&self) -> Option<(&dyn Encode, &dyn Encode)> {
        self.iter()
            .next()
            .map(|(k, v)| (k as &dyn Encode, v as &dyn Encode))
    }

    fn for_each_entry<'a>(
        &'a self,
        f: &mut dyn FnMut(&'a dyn Encode, &'a dyn Encode) -> Result<()>,
    ) -> Result<()> {
        for (k, v) in self {
            f(k, v)?;
        }
        Ok(())
    }
}

impl<K, V, S> Encode for HashMap<K, V, S>
where
    K: Encode,
    V: Encode,
    S: BuildHasher + 'static,
{
    fn build_encoder() -> Encoder {
        map_encoder::<K, V>()
    }

    #[inline]
    fn view(&self) -> ValueView<'_> {
        ValueView::Map(self)
    }
}

impl<K: Encode, V: Encode> MapView for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn first_entry(&self) -> Option<(&dyn Encode, &dyn Encode)> {
        self.iter()
            .next()
            .map(|(k, v)| (k as &dyn Encode, v as &dyn Encode))
    }

    fn for_each_entry<'a>(
        &'a self,
        f: &mut dyn FnMut(&'a dyn Encode, &'a dyn Encode) -> Result<()>,
    ) -> Result<()> {
        for (k, v) in self {
            f(k, v)?;
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn build_encoder() -> Encoder {
        map_encoder::<K, V>()
    }

    #[inline]
    fn view(&self) -> ValueView<'_> {
        ValueView::Map(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_integer_widths_share_encoders() {
        assert!(matches!(i8::build_encoder(), Encoder::Int));
        assert!(matches!(usize::build_encoder(), Encoder::Uint));
        assert!(matches!((-3i16).view(), ValueView::Int(-3)));
    }

    #[rstest]
    fn test_seq_view_iterates_in_order() {
        let items = VecDeque::from(vec![1u32, 2, 3]);
        let mut seen = Vec::new();
        items
            .for_each_item(&mut |item| {
                if let ValueView::Uint(v) = item.view() {
                    seen.push(v);
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_char_marshals_to_text() {
        assert_eq!('é'.marshal_text().unwrap(), "é");
        assert!(matches!('x'.view(), ValueView::Text(_)));
    }

    #[rstest]
    fn test_dynamic_box_is_flagged() {
        assert!(Box::<dyn Encode>::is_dynamic());
        assert!(!Box::<u8>::is_dynamic());
    }
}
