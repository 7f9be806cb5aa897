use serde_json::{Map, Number, Value};

use super::{Encode, MapView, ValueView};
use crate::encode::{map_encoder, Encoder};
use crate::error::Result;

fn number_view(number: &Number) -> ValueView<'_> {
    if let Some(v) = number.as_i64() {
        ValueView::Int(v)
    } else if let Some(v) = number.as_u64() {
        ValueView::Uint(v)
    } else {
        ValueView::F64(number.as_f64().unwrap_or_default())
    }
}

impl Encode for Number {
    fn build_encoder() -> Encoder {
        Encoder::Dynamic
    }

    fn view(&self) -> ValueView<'_> {
        number_view(self)
    }

    fn is_dynamic() -> bool {
        true
    }
}

/// Arrays and objects are exposed as references to their container so the
/// container's own cached encoder renders them.
impl Encode for Value {
    fn build_encoder() -> Encoder {
        Encoder::Dynamic
    }

    fn view(&self) -> ValueView<'_> {
        match self {
            Value::Null => ValueView::Null,
            Value::Bool(b) => ValueView::Bool(*b),
            Value::Number(n) => number_view(n),
            Value::String(s) => ValueView::Str(s),
            Value::Array(items) => ValueView::Pointer(Some(items as &dyn Encode)),
            Value::Object(map) => ValueView::Pointer(Some(map as &dyn Encode)),
        }
    }

    /// Only `null` counts as empty; a held `0`, `""` or `[]` is kept.
    fn is_empty_value(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn is_dynamic() -> bool {
        true
    }
}

impl MapView for Map<String, Value> {
    fn len(&self) -> usize {
        Map::len(self)
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

impl Encode for Map<String, Value> {
    fn build_encoder() -> Encoder {
        map_encoder::<String, Value>()
    }

    fn view(&self) -> ValueView<'_> {
        ValueView::Map(self)
    }
}
