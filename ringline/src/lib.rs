//! # ringline
//!
//! A fixed-capacity circular byte buffer for streaming device I/O:
//!
//! - **RingBuffer**: one reserved slot, caller-supplied or self-allocated storage
//! - **Line & Pattern Extraction**: delimited lines, byte and sequence search, peeking
//! - **Transport Glue**: `embedded-io` / `embedded-io-async` impls and fill/drain helpers
//!
//! ## Architecture
//!
//! ```text
//! UART RX / socket ─────► RingBuffer ─────► read_line / find_sequence
//!                             │
//!                    (one writer, one reader,
//!                     externally synchronized)
//! ```
//!
//! ## Embedded Use
//!
//! Without the `std`/`alloc` features the crate is `no_std` and only accepts
//! caller-supplied storage, typically a `static` array:
//!
//! ```rust
//! use ringline::RingBuffer;
//!
//! let mut rx = [0u8; 64];
//! let mut buffer = RingBuffer::init(64, Some(&mut rx[..])).unwrap();
//! assert_eq!(buffer.free_space(), 63);
//! assert_eq!(buffer.write(b"ready\n"), 6);
//! assert_eq!(buffer.find_byte(b'\n'), Some(5));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod buffer;
pub mod config;
pub mod error;
mod index;
pub mod io;
mod storage;

// Re-export main types for convenience
pub use buffer::{BufferSlice, BufferSliceMut, RingBuffer};
pub use config::BufferConfig;
pub use error::BufferError;
pub use io::{drain_into, drain_into_async, fill_from, fill_from_async};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line terminator a new buffer starts with
pub const DEFAULT_DELIMITER: u8 = b'\n';

/// Capacity used by [`BufferConfig::default`]
pub const DEFAULT_CAPACITY: usize = 256;

/// Smallest usable capacity: the reserved slot plus one byte of data
pub const MIN_CAPACITY: usize = 2;
