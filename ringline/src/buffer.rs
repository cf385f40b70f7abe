//! # Ring Buffer Implementation
//!
//! This module provides a fixed-capacity circular byte buffer for streaming
//! device I/O: a driver appends bytes as they arrive and a consumer drains
//! them, or pulls delimited lines and searches for patterns without copying
//! the whole buffer.
//!
//! ## Design Principles
//!
//! 1. **Fixed Capacity**: Storage is sized once at construction, either
//!    supplied by the caller (static array, arena) or allocated by the buffer.
//!
//! 2. **One Reserved Slot**: A buffer with `C` slots holds at most `C - 1`
//!    bytes, so `write == read` always means empty and `write + 1 == read`
//!    always means full. No separate full/empty flag exists.
//!
//! 3. **Never Blocks**: Short writes, short reads and incomplete lines are
//!    reported as partial counts, never as errors.
//!
//! 4. **Zero-Copy Views**: Unread bytes and free space are exposed as at most
//!    two contiguous slices so drivers and DMA can work in place.
//!
//! ## Memory Layout
//!
//! ```text
//! ┌──────────┬───────────────────────┬──────────────────────────────┐
//! │  free    │    readable data      │  free (wraps to the front)   │
//! └──────────┴───────────────────────┴──────────────────────────────┘
//!            ▲                       ▲
//!         read_idx               write_idx
//! ```
//!
//! ## Synchronization
//!
//! There is no internal locking and no atomics. One writer and one reader
//! may share a buffer only if the caller serializes cursor updates, e.g. by
//! masking the UART interrupt around `read`/`read_line` in the main loop.

use heapless::Vec;

use crate::config::BufferConfig;
use crate::error::BufferError;
use crate::index::{Cursor, Ring};
use crate::storage::Storage;
use crate::{DEFAULT_DELIMITER, MIN_CAPACITY};

/// A slice view into the unread bytes
#[derive(Debug, Clone, Copy)]
pub struct BufferSlice<'a> {
    /// First contiguous chunk (before wrap-around)
    pub first: &'a [u8],
    /// Second contiguous chunk (after wrap-around, may be empty)
    pub second: &'a [u8],
}

impl<'a> BufferSlice<'a> {
    const EMPTY: BufferSlice<'static> = BufferSlice {
        first: &[],
        second: &[],
    };

    /// Total length across both chunks
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Check if the slice is empty
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Byte at logical `offset` across both chunks
    pub fn get(&self, offset: usize) -> Option<u8> {
        match offset.checked_sub(self.first.len()) {
            None => Some(self.first[offset]),
            Some(rest) => self.second.get(rest).copied(),
        }
    }

    /// Iterate over the bytes in read order
    pub fn iter(&self) -> impl Iterator<Item = u8> + 'a {
        self.first.iter().chain(self.second.iter()).copied()
    }
}

/// A mutable slice view into the free space
#[derive(Debug)]
pub struct BufferSliceMut<'a> {
    /// First contiguous chunk (before wrap-around)
    pub first: &'a mut [u8],
    /// Second contiguous chunk (after wrap-around, may be empty)
    pub second: &'a mut [u8],
}

impl<'a> BufferSliceMut<'a> {
    fn empty() -> Self {
        Self {
            first: &mut [],
            second: &mut [],
        }
    }

    /// Total length across both chunks
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Check if the slice is empty
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }
}

/// Fixed-capacity circular byte buffer
///
/// The buffer is built for a producer/consumer pattern where:
/// - a serial or network driver writes bytes as they arrive (producer)
/// - a command parser reads bytes or whole lines (consumer)
///
/// Construct it once; there is no resizing and no re-initialization.
/// [`release`](Self::release) (or dropping the buffer) frees self-allocated
/// storage and hands caller-supplied storage back.
///
/// # Example
///
/// ```rust
/// use ringline::RingBuffer;
///
/// let mut backing = [0u8; 32];
/// let mut buffer = RingBuffer::with_storage(&mut backing).unwrap();
///
/// // Producer: bytes arrive from the UART
/// buffer.write_str("OK\r\nERR");
///
/// // Consumer: wait for a complete line
/// let mut line = [0u8; 16];
/// let n = buffer.read_line(&mut line);
/// assert_eq!(&line[..n], b"OK\r\n");
/// assert_eq!(buffer.used_space(), 3);
/// ```
pub struct RingBuffer<'a> {
    /// Backing slots, caller-supplied or self-allocated
    storage: Storage<'a>,
    /// Slot count used for all cursor arithmetic
    ring: Ring,
    /// Where the producer writes next
    write_idx: Cursor,
    /// Where the consumer reads next
    read_idx: Cursor,
    /// Line terminator for `read_line`
    delimiter: u8,
    initialized: bool,
}

#[cfg(feature = "alloc")]
impl RingBuffer<'static> {
    /// Create a buffer with self-allocated storage of `capacity` slots
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        RingBuffer::init(capacity, None)
    }

    /// Create a self-allocated buffer from a validated configuration
    pub fn from_config(config: &BufferConfig) -> Result<Self, BufferError> {
        config.validate()?;
        let mut buffer = RingBuffer::new(config.capacity)?;
        buffer.set_delimiter(config.delimiter);
        Ok(buffer)
    }
}

impl<'a> RingBuffer<'a> {
    /// Create a buffer with `capacity` slots
    ///
    /// With `storage`, the first `capacity` bytes of the slice back the ring
    /// and the buffer never frees them. Without it, the buffer allocates and
    /// owns its storage.
    ///
    /// # Errors
    /// - [`BufferError::CapacityTooSmall`] if `capacity < 2`
    /// - [`BufferError::StorageTooSmall`] if `storage` is shorter than `capacity`
    /// - [`BufferError::AllocationFailed`] if no storage could be allocated
    pub fn init(capacity: usize, storage: Option<&'a mut [u8]>) -> Result<Self, BufferError> {
        if capacity < MIN_CAPACITY {
            return Err(BufferError::CapacityTooSmall { capacity });
        }

        let storage = match storage {
            Some(data) => {
                let len = data.len();
                if len < capacity {
                    return Err(BufferError::StorageTooSmall { len, capacity });
                }
                Storage::Borrowed(&mut data[..capacity])
            }
            None => Storage::allocate(capacity)?,
        };

        Ok(Self {
            storage,
            ring: Ring::new(capacity),
            write_idx: Cursor::ZERO,
            read_idx: Cursor::ZERO,
            delimiter: DEFAULT_DELIMITER,
            initialized: true,
        })
    }

    /// Create a buffer over the whole of `storage`
    pub fn with_storage(storage: &'a mut [u8]) -> Result<Self, BufferError> {
        let capacity = storage.len();
        Self::init(capacity, Some(storage))
    }

    /// Release the storage and leave an uninitialized instance behind
    ///
    /// Self-allocated storage is freed; caller-supplied storage is returned.
    /// Releasing an already released buffer does nothing.
    pub fn release(&mut self) -> Option<&'a mut [u8]> {
        if !self.initialized {
            return None;
        }
        let storage = core::mem::take(&mut self.storage);
        self.ring = Ring::default();
        self.write_idx = Cursor::ZERO;
        self.read_idx = Cursor::ZERO;
        self.initialized = false;
        storage.into_borrowed()
    }

    /// Whether the buffer is backed by storage
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tell a released buffer apart from an empty one
    pub fn ensure_initialized(&self) -> Result<(), BufferError> {
        if self.initialized {
            Ok(())
        } else {
            Err(BufferError::NotInitialized)
        }
    }

    /// Whether the buffer allocated its own storage
    pub fn is_self_allocated(&self) -> bool {
        self.storage.is_owned()
    }

    /// Number of slots, including the reserved one
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.slots()
    }

    /// Current configuration
    pub fn config(&self) -> BufferConfig {
        BufferConfig::new(self.capacity()).with_delimiter(self.delimiter)
    }

    /// Line terminator used by [`read_line`](Self::read_line)
    #[inline]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Change the line terminator; affects later `read_line` calls only
    #[inline]
    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// Get the number of bytes available to read
    #[inline]
    pub fn used_space(&self) -> usize {
        self.ring.distance(self.read_idx, self.write_idx)
    }

    /// Get the number of bytes that can still be written
    #[inline]
    pub fn free_space(&self) -> usize {
        // Leave one slot to distinguish full from empty
        self.capacity().saturating_sub(1) - self.used_space()
    }

    /// Check if the buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used_space() == 0
    }

    /// Check if the buffer is full
    #[inline]
    pub fn is_full(&self) -> bool {
        self.initialized && self.free_space() == 0
    }

    /// Discard all buffered bytes; storage contents are left as they are
    pub fn reset(&mut self) {
        self.write_idx = Cursor::ZERO;
        self.read_idx = Cursor::ZERO;
    }

    /// Get a split readable view of up to `max_len` unread bytes
    ///
    /// Returns two slices that together contain the data in read order,
    /// handling the case where it wraps around the storage end.
    pub fn readable_split(&self, max_len: usize) -> BufferSlice<'_> {
        let len = max_len.min(self.used_space());
        if len == 0 {
            return BufferSlice::EMPTY;
        }

        let read = self.read_idx.get();
        let first_len = len.min(self.ring.until_end(self.read_idx));
        let data = self.storage.as_slice();

        BufferSlice {
            first: &data[read..read + first_len],
            second: &data[..len - first_len],
        }
    }

    /// Get a split writable view of up to `max_len` free bytes
    ///
    /// Fill the slices, then call [`commit`](Self::commit) to make the bytes
    /// readable.
    pub fn writable_split_mut(&mut self, max_len: usize) -> BufferSliceMut<'_> {
        let len = max_len.min(self.free_space());
        if len == 0 {
            return BufferSliceMut::empty();
        }

        let write = self.write_idx.get();
        let first_len = len.min(self.ring.until_end(self.write_idx));
        let (head, tail) = self.storage.as_mut_slice().split_at_mut(write);

        BufferSliceMut {
            first: &mut tail[..first_len],
            second: &mut head[..len - first_len],
        }
    }

    /// Commit written bytes, making them available to readers
    pub fn commit(&mut self, len: usize) -> Result<(), BufferError> {
        if len > self.free_space() {
            return Err(BufferError::Overflow);
        }
        self.write_idx = self.ring.advance(self.write_idx, len);
        Ok(())
    }

    /// Consume read bytes, freeing space for writers
    pub fn consume(&mut self, len: usize) -> Result<(), BufferError> {
        if len > self.used_space() {
            return Err(BufferError::Underflow);
        }
        self.read_idx = self.ring.advance(self.read_idx, len);
        Ok(())
    }

    /// Write as many bytes of `data` as fit
    ///
    /// Stops early, without error, once the buffer is full. Returns the
    /// number of bytes stored; 0 for a full or released buffer.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let region = self.writable_split_mut(data.len());
        let len = region.len();
        let (head, tail) = data[..len].split_at(region.first.len());
        region.first.copy_from_slice(head);
        region.second.copy_from_slice(tail);

        #[cfg(feature = "defmt")]
        if len < data.len() {
            defmt::trace!("ring full: stored {} of {} bytes", len, data.len());
        }

        self.write_idx = self.ring.advance(self.write_idx, len);
        len
    }

    /// Write the bytes of `text`, without any terminator
    pub fn write_str(&mut self, text: &str) -> usize {
        self.write(text.as_bytes())
    }

    /// Read up to `out.len()` bytes, stopping when the buffer runs empty
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let view = self.readable_split(out.len());
        let len = view.len();
        let (head, tail) = out[..len].split_at_mut(view.first.len());
        head.copy_from_slice(view.first);
        tail.copy_from_slice(view.second);

        self.read_idx = self.ring.advance(self.read_idx, len);
        len
    }

    /// Byte at logical `offset` from the read position, without consuming it
    ///
    /// Offset 0 is the next byte `read` would return. `None` once `offset`
    /// reaches the number of buffered bytes.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.readable_split(usize::MAX).get(offset)
    }

    /// Offset of the first `target` among the unread bytes
    pub fn find_byte(&self, target: u8) -> Option<usize> {
        self.readable_split(usize::MAX)
            .iter()
            .position(|byte| byte == target)
    }

    /// Offset of the first full occurrence of `pattern` among the unread bytes
    ///
    /// Plain left-to-right scan that restarts one byte after each failed
    /// candidate: O(n·m) in the worst case, which is fine for the small
    /// buffers this is used with. An empty pattern matches at offset 0.
    pub fn find_sequence(&self, pattern: &[u8]) -> Option<usize> {
        let view = self.readable_split(usize::MAX);
        let used = view.len();
        if pattern.len() > used {
            return None;
        }

        (0..=used - pattern.len()).find(|&start| {
            pattern
                .iter()
                .enumerate()
                .all(|(i, &byte)| view.get(start + i) == Some(byte))
        })
    }

    /// Number of bytes a line read with `max_length` bytes of output may take
    ///
    /// `None` while the line is not ready: the buffer is empty, or the
    /// delimiter has not arrived yet, the buffer is not full and fewer than
    /// `max_length` bytes are waiting.
    fn line_len(&self, max_length: usize) -> Option<usize> {
        if max_length == 0 || self.is_empty() {
            return None;
        }

        let used = self.used_space();
        let limit = max_length - 1;
        match self.find_byte(self.delimiter) {
            Some(pos) if pos < limit => Some(pos + 1),
            Some(_) => Some(limit),
            None if self.is_full() || used >= max_length => Some(limit.min(used)),
            None => None,
        }
    }

    /// Read one delimited line into `out` and zero-terminate it
    ///
    /// Consumes bytes up to and including the delimiter, or `out.len() - 1`
    /// bytes when the line is longer than `out` allows. Returns the number
    /// of bytes consumed, which excludes the terminator.
    ///
    /// Returns 0 and consumes nothing while a complete line is not yet
    /// available; see [`next_line`](Self::next_line) for the exact rule.
    pub fn read_line(&mut self, out: &mut [u8]) -> usize {
        let Some(len) = self.line_len(out.len()) else {
            if let Some(first) = out.first_mut() {
                *first = 0;
            }
            return 0;
        };

        let read = self.read(&mut out[..len]);
        out[read] = 0;
        read
    }

    /// Read one delimited line of at most `N` bytes into a `heapless::Vec`
    ///
    /// A line is handed out once the delimiter is buffered, once the buffer
    /// is full, or once more than `N` bytes are waiting. In the last two
    /// cases the line is cut at `N` bytes and the rest stays buffered.
    /// Returns `None` while more data may still be in flight.
    pub fn next_line<const N: usize>(&mut self) -> Option<Vec<u8, N>> {
        // One extra byte stands in for the terminator `read_line` would write
        let len = self.line_len(N + 1).filter(|&len| len > 0)?;

        let mut line = Vec::new();
        let view = self.readable_split(len);
        line.extend_from_slice(view.first).ok()?;
        line.extend_from_slice(view.second).ok()?;

        self.read_idx = self.ring.advance(self.read_idx, len);
        Some(line)
    }
}

impl Default for RingBuffer<'_> {
    /// An uninitialized buffer with no storage
    fn default() -> Self {
        Self {
            storage: Storage::default(),
            ring: Ring::default(),
            write_idx: Cursor::ZERO,
            read_idx: Cursor::ZERO,
            delimiter: DEFAULT_DELIMITER,
            initialized: false,
        }
    }
}

impl core::fmt::Debug for RingBuffer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("used", &self.used_space())
            .field("delimiter", &self.delimiter)
            .field("self_allocated", &self.is_self_allocated())
            .field("initialized", &self.initialized)
            .finish()
    }
}
