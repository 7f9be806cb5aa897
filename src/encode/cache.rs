//! Process-wide memo of one [`Encoder`] per type.
//!
//! Encoders are built outside the lock and installed first-writer-wins, so two
//! threads racing on a new type agree on a single leaked instance. A
//! per-thread front map makes warm lookups lock-free.

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::debug;

use crate::encode::Encoder;
use crate::types::Encode;

type EncoderMap = HashMap<TypeId, &'static Encoder>;

static ENCODERS: LazyLock<RwLock<EncoderMap>> = LazyLock::new(|| RwLock::new(HashMap::new()));

thread_local! {
    static LOCAL_ENCODERS: RefCell<EncoderMap> = RefCell::new(HashMap::new());
}

/// The cached encoder for `T`, building it on first use.
#[inline]
pub fn encoder_of<T: Encode>() -> &'static Encoder {
    let id = TypeId::of::<T>();
    let local = LOCAL_ENCODERS
        .try_with(|map| map.borrow().get(&id).copied())
        .ok()
        .flatten();
    if let Some(encoder) = local {
        return encoder;
    }

    let encoder = shared_encoder::<T>(id);
    let _ = LOCAL_ENCODERS.try_with(|map| map.borrow_mut().insert(id, encoder));
    encoder
}

fn shared_encoder<T: Encode>(id: TypeId) -> &'static Encoder {
    if let Some(encoder) = ENCODERS.read().get(&id).copied() {
        return encoder;
    }

    let built = T::build_encoder();
    match ENCODERS.write().entry(id) {
        // lost the race; `built` is dropped
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            let encoder: &'static Encoder = Box::leak(Box::new(built));
            debug!(
                type_name = type_name::<T>(),
                kind = encoder.kind_name(),
                "installed encoder"
            );
            *entry.insert(encoder)
        }
    }
}

/// Number of types with an installed encoder.
pub fn cached_encoder_count() -> usize {
    ENCODERS.read().len()
}

/// Whether an encoder for `T` has been installed.
pub fn is_cached<T: Encode>() -> bool {
    ENCODERS.read().contains_key(&TypeId::of::<T>())
}
