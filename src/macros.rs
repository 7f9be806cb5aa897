/// Implement [`Encode`](crate::Encode) and [`StructView`](crate::StructView)
/// for a struct with named fields.
///
/// Every listed field maps to a JSON key; fields are emitted in the listed
/// order. `#[omitempty]` skips a field whose value is empty.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// struct Record {
///     name: String,
///     n: i64,
///     m: HashMap<String, i64>,
///     note: Option<String>,
/// }
///
/// sjson::encode_struct!(Record {
///     name: String => "name",
///     n: i64 => "n",
///     m: HashMap<String, i64> => "m",
///     #[omitempty]
///     note: Option<String> => "note",
/// });
///
/// let record = Record {
///     name: "a\nb".into(),
///     n: 5,
///     m: HashMap::new(),
///     note: None,
/// };
/// assert_eq!(sjson::to_string(&record)?, r#"{"name":"a\nb","n":5,"m":{}}"#);
/// # Ok::<(), sjson::Error>(())
/// ```
///
/// The listed type must be the field's type:
///
/// ```compile_fail
/// struct Count {
///     n: i32,
/// }
///
/// sjson::encode_struct!(Count {
///     n: u32 => "n",
/// });
/// ```
#[macro_export]
macro_rules! encode_struct {
    ($ty:ident { $($(#[$flag:ident])? $field:ident : $fty:ty => $name:literal),* $(,)? }) => {
        impl $crate::Encode for $ty {
            fn build_encoder() -> $crate::Encoder {
                let builder = $crate::encode::StructEncoder::builder::<Self>();
                $(
                    let builder = $crate::__encode_struct_field!(builder, $($flag)?, $fty, $name);
                )*
                builder.build()
            }

            fn view(&self) -> $crate::ValueView<'_> {
                $crate::ValueView::Struct(self)
            }
        }

        impl $crate::StructView for $ty {
            #[allow(unused_variables, unused_assignments, unused_mut)]
            fn field(&self, index: usize) -> &dyn $crate::Encode {
                let mut slot = 0usize;
                $(
                    if index == slot {
                        let field: &$fty = &self.$field;
                        return field;
                    }
                    slot += 1;
                )*
                &()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __encode_struct_field {
    ($builder:ident, omitempty, $fty:ty, $name:literal) => {
        $builder.omit_empty_field::<$fty>($name)
    };
    ($builder:ident, , $fty:ty, $name:literal) => {
        $builder.field::<$fty>($name)
    };
}

/// Implement [`Encode`](crate::Encode) for types that render as their
/// [`MarshalText`](crate::MarshalText) form.
#[macro_export]
macro_rules! encode_as_text {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Encode for $ty {
            fn build_encoder() -> $crate::Encoder {
                $crate::Encoder::Fallback
            }

            fn view(&self) -> $crate::ValueView<'_> {
                $crate::ValueView::Text(self)
            }
        }
    )*};
}
