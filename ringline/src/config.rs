//! # Buffer Configuration
//!
//! Construction parameters for a [`RingBuffer`](crate::RingBuffer). The
//! configuration is `serde`-serializable and encodes with `postcard`, so a
//! device can keep it in flash next to its other settings.

use serde::{Deserialize, Serialize};

use crate::error::BufferError;
use crate::{DEFAULT_CAPACITY, DEFAULT_DELIMITER, MIN_CAPACITY};

/// Capacity and line delimiter for a ring buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferConfig {
    /// Number of slots, one of which is always kept empty
    pub capacity: usize,
    /// Byte terminating a line for `read_line`
    pub delimiter: u8,
}

impl BufferConfig {
    /// Create a configuration with the default delimiter
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Replace the line delimiter
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check the capacity can hold the reserved slot plus one byte
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.capacity < MIN_CAPACITY {
            return Err(BufferError::CapacityTooSmall {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Encode into `buf`, returning the used prefix
    pub fn to_slice<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], BufferError> {
        postcard::to_slice(self, buf).map_err(|_| BufferError::InvalidConfig)
    }

    /// Decode and validate a configuration previously written by [`Self::to_slice`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BufferError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| BufferError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
