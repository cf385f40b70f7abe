//! Errors for construction and the checked buffer operations.
//!
//! Running out of space or data is not an error: `write`, `read` and
//! `read_line` report partial counts instead. The variants below cover
//! construction failures, use of a released instance, and the checked
//! zero-copy calls (`commit`, `consume`).

use thiserror::Error;

/// Errors specific to buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Self-allocated storage could not be obtained
    #[error("failed to allocate {capacity} bytes of buffer storage")]
    AllocationFailed {
        /// Requested capacity in bytes
        capacity: usize,
    },
    /// Capacity cannot hold the reserved slot plus at least one byte
    #[error("capacity {capacity} is below the minimum of 2")]
    CapacityTooSmall {
        /// Requested capacity in bytes
        capacity: usize,
    },
    /// Caller-supplied storage is shorter than the requested capacity
    #[error("external storage holds {len} bytes but {capacity} were requested")]
    StorageTooSmall {
        /// Length of the supplied slice
        len: usize,
        /// Requested capacity in bytes
        capacity: usize,
    },
    /// The instance was released or never backed by storage
    #[error("buffer is not initialized")]
    NotInitialized,
    /// Attempted to commit or write more bytes than there is free space
    #[error("buffer is full")]
    Overflow,
    /// Attempted to consume more bytes than are buffered
    #[error("not enough buffered data")]
    Underflow,
    /// A persisted configuration could not be encoded or decoded
    #[error("invalid buffer configuration encoding")]
    InvalidConfig,
}
