//! Thread-local recycling of encoder streams and sorted-key scratch space.
//!
//! Each thread owns its pools, so acquire and release never contend.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::constants::{
    DEFAULT_SCRATCH_CAPACITY, DEFAULT_STREAM_CAPACITY, MAX_POOLED_SCRATCH, MAX_POOLED_STREAMS,
    MAX_SCRATCH_CAPACITY, STREAM_HIGH_WATER_MARK,
};
use crate::encode::map::SortEntry;
use crate::encode::stream::EncoderStream;
use crate::options::Config;

#[derive(Default)]
struct StreamPool {
    free: Vec<EncoderStream>,
}

impl StreamPool {
    fn acquire(&mut self, estimate: usize, config: Config) -> EncoderStream {
        let mut stream = self
            .free
            .pop()
            .unwrap_or_else(|| EncoderStream::new(config));
        stream.set_config(config);
        if estimate > stream.capacity() {
            stream.reserve(estimate);
        }
        stream
    }

    fn release(&mut self, mut stream: EncoderStream) {
        if stream.capacity() > STREAM_HIGH_WATER_MARK {
            tracing::trace!(
                capacity = stream.capacity(),
                "replacing oversized stream buffer"
            );
            stream = EncoderStream::with_capacity(DEFAULT_STREAM_CAPACITY, *stream.config());
        } else {
            stream.reset();
        }
        if self.free.len() < MAX_POOLED_STREAMS {
            self.free.push(stream);
        }
    }
}

#[derive(Default)]
struct ScratchPool {
    free: Vec<Vec<SortEntry<'static>>>,
}

thread_local! {
    static STREAM_POOL: RefCell<StreamPool> = RefCell::new(StreamPool::default());
    static SCRATCH_POOL: RefCell<ScratchPool> = RefCell::new(ScratchPool::default());
}

/// A stream on loan from the current thread's pool.
///
/// Returned to the pool when dropped, whether the encode succeeded, failed or
/// unwound.
pub struct PooledStream {
    stream: EncoderStream,
}

impl Deref for PooledStream {
    type Target = EncoderStream;

    fn deref(&self) -> &EncoderStream {
        &self.stream
    }
}

impl DerefMut for PooledStream {
    fn deref_mut(&mut self) -> &mut EncoderStream {
        &mut self.stream
    }
}

impl Drop for PooledStream {
    fn drop(&mut self) {
        // a zero-capacity placeholder does not allocate
        let stream = std::mem::replace(
            &mut self.stream,
            EncoderStream::with_capacity(0, Config::default()),
        );
        // the pool is gone during thread teardown; the stream is dropped then
        let _ = STREAM_POOL.try_with(|pool| pool.borrow_mut().release(stream));
    }
}

/// Take a stream with room for at least `estimate` bytes.
pub fn acquire(estimate: usize, config: Config) -> PooledStream {
    let stream = STREAM_POOL
        .try_with(|pool| pool.borrow_mut().acquire(estimate, config))
        .unwrap_or_else(|_| {
            EncoderStream::with_capacity(estimate.max(DEFAULT_STREAM_CAPACITY), config)
        });
    PooledStream { stream }
}

/// Number of idle streams held by the current thread.
pub fn pooled_streams() -> usize {
    STREAM_POOL
        .try_with(|pool| pool.borrow().free.len())
        .unwrap_or(0)
}

/// Capacities of the idle streams held by the current thread.
pub fn pooled_stream_capacities() -> Vec<usize> {
    STREAM_POOL
        .try_with(|pool| pool.borrow().free.iter().map(|s| s.capacity()).collect())
        .unwrap_or_default()
}

pub(crate) fn take_scratch(len: usize) -> Vec<SortEntry<'static>> {
    let mut entries = SCRATCH_POOL
        .try_with(|pool| pool.borrow_mut().free.pop())
        .ok()
        .flatten()
        .unwrap_or_else(|| Vec::with_capacity(DEFAULT_SCRATCH_CAPACITY));
    entries.reserve(len);
    entries
}

pub(crate) fn put_scratch(mut entries: Vec<SortEntry<'_>>) {
    if entries.capacity() > MAX_SCRATCH_CAPACITY {
        tracing::trace!(capacity = entries.capacity(), "discarding oversized scratch");
        return;
    }
    entries.clear();
    // An empty vector holds no borrows; in-place collection keeps the
    // allocation while dropping the lifetime.
    let entries: Vec<SortEntry<'static>> = entries.into_iter().filter_map(|_| None).collect();
    if entries.capacity() == 0 {
        return;
    }
    let _ = SCRATCH_POOL.try_with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.free.len() < MAX_POOLED_SCRATCH {
            pool.free.push(entries);
        }
    });
}

/// Capacities of the idle scratch sequences held by the current thread.
pub fn pooled_scratch_capacities() -> Vec<usize> {
    SCRATCH_POOL
        .try_with(|pool| pool.borrow().free.iter().map(Vec::capacity).collect())
        .unwrap_or_default()
}
