//! Backing memory for a [`RingBuffer`](crate::RingBuffer).
//!
//! Embedded targets usually hand the buffer a `static` array or an arena
//! slice; hosted targets let the buffer allocate. The variant doubles as the
//! ownership flag: only `Owned` memory is freed on release.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};

use crate::error::BufferError;

/// Storage for the ring slots
#[derive(Debug)]
pub enum Storage<'a> {
    /// Externally supplied; the buffer never frees it
    Borrowed(&'a mut [u8]),
    /// Allocated by the buffer and owned exclusively
    #[cfg(feature = "alloc")]
    Owned(Box<[u8]>),
}

impl<'a> Storage<'a> {
    /// Allocate `capacity` zeroed bytes
    ///
    /// Returns [`BufferError::AllocationFailed`] when the allocator refuses
    /// or when the crate was built without the `alloc` feature.
    pub fn allocate(capacity: usize) -> Result<Self, BufferError> {
        #[cfg(feature = "alloc")]
        {
            let mut data = Vec::new();
            if data.try_reserve_exact(capacity).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("ring storage allocation of {} bytes failed", capacity);
                return Err(BufferError::AllocationFailed { capacity });
            }
            data.resize(capacity, 0);
            Ok(Storage::Owned(data.into_boxed_slice()))
        }

        #[cfg(not(feature = "alloc"))]
        {
            Err(BufferError::AllocationFailed { capacity })
        }
    }

    /// Whether the buffer allocated this memory itself
    pub fn is_owned(&self) -> bool {
        match self {
            Storage::Borrowed(_) => false,
            #[cfg(feature = "alloc")]
            Storage::Owned(_) => true,
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Borrowed(data) => &data[..],
            #[cfg(feature = "alloc")]
            Storage::Owned(data) => &data[..],
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Borrowed(data) => &mut data[..],
            #[cfg(feature = "alloc")]
            Storage::Owned(data) => &mut data[..],
        }
    }

    /// Give borrowed memory back to its owner; owned memory is dropped
    pub(crate) fn into_borrowed(self) -> Option<&'a mut [u8]> {
        match self {
            Storage::Borrowed(data) => Some(data),
            #[cfg(feature = "alloc")]
            Storage::Owned(_) => None,
        }
    }
}

impl Default for Storage<'_> {
    fn default() -> Self {
        Storage::Borrowed(&mut [])
    }
}
