pub(crate) const NULL: &[u8] = b"null";
pub(crate) const TRUE: &[u8] = b"true";
pub(crate) const FALSE: &[u8] = b"false";
pub(crate) const EMPTY_STRING: &[u8] = b"\"\"";
pub(crate) const EMPTY_OBJECT: &[u8] = b"{}";
pub(crate) const EMPTY_ARRAY: &[u8] = b"[]";

/// Capacity of a freshly allocated stream buffer.
pub const DEFAULT_STREAM_CAPACITY: usize = 2048;

/// Buffers that grew past this are dropped instead of being pooled.
pub const STREAM_HIGH_WATER_MARK: usize = 8192;

pub(crate) const MAX_POOLED_STREAMS: usize = 8;

pub(crate) const DEFAULT_SCRATCH_CAPACITY: usize = 16;
pub(crate) const MAX_SCRATCH_CAPACITY: usize = 64;
pub(crate) const MAX_POOLED_SCRATCH: usize = 4;

// Root size estimates.
pub(crate) const ESTIMATE_PER_MAP_ENTRY: usize = 32;
pub(crate) const ESTIMATE_PER_SEQ_ITEM: usize = 16;
pub(crate) const ESTIMATE_PER_STRING_MAP_ENTRY: usize = 24;
pub(crate) const ESTIMATE_PER_STRING_ITEM: usize = 12;
pub(crate) const ESTIMATE_STRING_OVERHEAD: usize = 16;
pub(crate) const ESTIMATE_DEFAULT: usize = 256;

// Per-object reservations made before iterating.
pub(crate) const RESERVE_PER_MAP_ENTRY: usize = 20;
pub(crate) const RESERVE_PER_FIELD: usize = 4 + 20;
