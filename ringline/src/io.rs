//! # Transport Integration
//!
//! `embedded-io` implementations so a [`RingBuffer`] plugs into drivers and
//! parsers written against the `embedded-io` / `embedded-io-async` traits,
//! plus helpers that move bytes between a transport and the buffer without an
//! intermediate copy.
//!
//! ```text
//! UART / socket ──fill_from──► RingBuffer ──read_line──► command parser
//!                                  │
//!                                  └──drain_into──► forwarding sink
//! ```
//!
//! None of these calls wait on the buffer itself: reading an empty buffer
//! yields `Ok(0)` and writing into a full one yields
//! [`BufferError::Overflow`], the same contract as the slice impls in
//! `embedded-io`. A transport passed to `fill_from`/`drain_into` may still
//! block according to its own semantics.

use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write, WriteReady};

use crate::buffer::RingBuffer;
use crate::error::BufferError;

impl embedded_io::Error for BufferError {
    fn kind(&self) -> ErrorKind {
        match self {
            BufferError::Overflow => ErrorKind::OutOfMemory,
            BufferError::AllocationFailed { .. } => ErrorKind::OutOfMemory,
            BufferError::Underflow
            | BufferError::CapacityTooSmall { .. }
            | BufferError::StorageTooSmall { .. }
            | BufferError::InvalidConfig => ErrorKind::InvalidInput,
            BufferError::NotInitialized => ErrorKind::Other,
        }
    }
}

impl ErrorType for RingBuffer<'_> {
    type Error = BufferError;
}

impl Read for RingBuffer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.ensure_initialized()?;
        Ok(RingBuffer::read(self, buf))
    }
}

impl ReadReady for RingBuffer<'_> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.ensure_initialized()?;
        Ok(!self.is_empty())
    }
}

impl Write for RingBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.ensure_initialized()?;
        match RingBuffer::write(self, buf) {
            0 if !buf.is_empty() => Err(BufferError::Overflow),
            written => Ok(written),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl WriteReady for RingBuffer<'_> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        self.ensure_initialized()?;
        Ok(!self.is_full())
    }
}

impl embedded_io_async::Read for RingBuffer<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Read::read(self, buf)
    }
}

impl embedded_io_async::Write for RingBuffer<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Write::write(self, buf)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Read once from `source` straight into the buffer's free space
///
/// Returns the number of bytes committed. A full buffer returns `Ok(0)`
/// without touching the source. A source that reports more than the slice
/// it was handed is clamped to that slice.
pub fn fill_from<R: Read>(buffer: &mut RingBuffer<'_>, source: &mut R) -> Result<usize, R::Error> {
    let region = buffer.writable_split_mut(usize::MAX);
    if region.is_empty() {
        return Ok(0);
    }

    let room = region.first.len();
    let n = source.read(region.first)?.min(room);
    Ok(publish(buffer, n))
}

/// Async variant of [`fill_from`]
pub async fn fill_from_async<R: embedded_io_async::Read>(
    buffer: &mut RingBuffer<'_>,
    source: &mut R,
) -> Result<usize, R::Error> {
    let region = buffer.writable_split_mut(usize::MAX);
    if region.is_empty() {
        return Ok(0);
    }

    let room = region.first.len();
    let n = source.read(region.first).await?.min(room);
    Ok(publish(buffer, n))
}

/// Write the contiguous run of unread bytes to `sink` once
///
/// Consumes exactly what the sink accepted and returns that count. An empty
/// buffer returns `Ok(0)` without touching the sink.
pub fn drain_into<W: Write>(buffer: &mut RingBuffer<'_>, sink: &mut W) -> Result<usize, W::Error> {
    let view = buffer.readable_split(usize::MAX);
    if view.is_empty() {
        return Ok(0);
    }

    let pending = view.first.len();
    let n = sink.write(view.first)?.min(pending);
    Ok(retire(buffer, n))
}

/// Async variant of [`drain_into`]
pub async fn drain_into_async<W: embedded_io_async::Write>(
    buffer: &mut RingBuffer<'_>,
    sink: &mut W,
) -> Result<usize, W::Error> {
    let view = buffer.readable_split(usize::MAX);
    if view.is_empty() {
        return Ok(0);
    }

    let pending = view.first.len();
    let n = sink.write(view.first).await?.min(pending);
    Ok(retire(buffer, n))
}

/// Commit `n` freshly written bytes; returns what became readable
fn publish(buffer: &mut RingBuffer<'_>, n: usize) -> usize {
    match buffer.commit(n) {
        Ok(()) => n,
        Err(_) => 0,
    }
}

/// Consume `n` bytes a sink accepted; returns what was actually released
fn retire(buffer: &mut RingBuffer<'_>, n: usize) -> usize {
    match buffer.consume(n) {
        Ok(()) => n,
        Err(_) => 0,
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Buffer over `backing` (8 slots) with both cursors at slot 6
    fn rotated_at_six(backing: &mut [u8]) -> RingBuffer<'_> {
        let mut buffer = RingBuffer::with_storage(backing).unwrap();
        buffer.write(b"123456");
        let mut sink = [0u8; 6];
        buffer.read(&mut sink);
        buffer
    }

    /// Source that hands out at most `chunk` bytes per read
    struct ChunkedSource<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl ErrorType for ChunkedSource<'_> {
        type Error = Infallible;
    }

    impl Read for ChunkedSource<'_> {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.chunk).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    impl embedded_io_async::Read for ChunkedSource<'_> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Read::read(self, buf)
        }
    }

    /// Sink that accepts at most `limit` bytes per write
    struct Collector {
        bytes: std::vec::Vec<u8>,
        limit: usize,
    }

    impl ErrorType for Collector {
        type Error = Infallible;
    }

    impl Write for Collector {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.limit);
            self.bytes.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl embedded_io_async::Write for Collector {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Write::write(self, buf)
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Source that fills the slice it gets but claims a few extra bytes
    struct Overreporting {
        fill: u8,
        extra: usize,
    }

    impl ErrorType for Overreporting {
        type Error = Infallible;
    }

    impl Read for Overreporting {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            buf.fill(self.fill);
            Ok(buf.len() + self.extra)
        }
    }

    impl embedded_io_async::Read for Overreporting {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Read::read(self, buf)
        }
    }

    impl Write for Overreporting {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Ok(buf.len() + self.extra)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl embedded_io_async::Write for Overreporting {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Write::write(self, buf)
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_embedded_io_write_full_is_overflow() {
        let mut buffer = RingBuffer::new(4).unwrap();
        assert_eq!(Write::write(&mut buffer, b"abcdef"), Ok(3));
        assert_eq!(Write::write(&mut buffer, b"g"), Err(BufferError::Overflow));
        assert_eq!(Write::write(&mut buffer, b""), Ok(0));
        assert_eq!(buffer.write_ready(), Ok(false));
    }

    #[test]
    fn test_embedded_io_read_empty_is_zero() {
        let mut buffer = RingBuffer::new(8).unwrap();
        let mut out = [0u8; 4];
        assert_eq!(Read::read(&mut buffer, &mut out), Ok(0));
        assert_eq!(buffer.read_ready(), Ok(false));

        buffer.write_str("hi");
        assert_eq!(buffer.read_ready(), Ok(true));
        assert_eq!(Read::read(&mut buffer, &mut out), Ok(2));
    }

    #[test]
    fn test_released_buffer_reports_not_initialized() {
        let mut buffer = RingBuffer::new(8).unwrap();
        buffer.release();
        let mut out = [0u8; 4];
        assert_eq!(
            Read::read(&mut buffer, &mut out),
            Err(BufferError::NotInitialized)
        );
        assert_eq!(
            Write::write(&mut buffer, b"x"),
            Err(BufferError::NotInitialized)
        );
    }

    #[test]
    fn test_error_kinds() {
        use embedded_io::Error;
        assert_eq!(BufferError::Overflow.kind(), ErrorKind::OutOfMemory);
        assert_eq!(BufferError::Underflow.kind(), ErrorKind::InvalidInput);
        assert_eq!(BufferError::NotInitialized.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_fill_from_wraps_in_two_reads() {
        let mut backing = [0u8; 8];
        let mut buffer = RingBuffer::with_storage(&mut backing).unwrap();
        buffer.write(b"123456");
        let mut sink = [0u8; 6];
        buffer.read(&mut sink);

        let mut source = ChunkedSource {
            data: b"AT+RST\r\n",
            chunk: 16,
        };
        // First read stops at the physical end of the storage
        assert_eq!(fill_from(&mut buffer, &mut source), Ok(2));
        assert_eq!(fill_from(&mut buffer, &mut source), Ok(5));
        assert!(buffer.is_full());
        assert_eq!(fill_from(&mut buffer, &mut source), Ok(0));
        assert_eq!(source.data, b"\n");

        assert_eq!(buffer.find_sequence(b"RST\r"), Some(3));
    }

    #[test]
    fn test_drain_into_consumes_accepted_bytes() {
        let mut buffer = RingBuffer::new(16).unwrap();
        buffer.write_str("forward me");

        let mut sink = Collector {
            bytes: std::vec::Vec::new(),
            limit: 4,
        };
        assert_eq!(drain_into(&mut buffer, &mut sink), Ok(4));
        assert_eq!(buffer.used_space(), 6);
        while drain_into(&mut buffer, &mut sink) != Ok(0) {}
        assert_eq!(sink.bytes, b"forward me");
    }

    #[test]
    fn test_fill_from_clamps_overreported_count() {
        let mut backing = [0u8; 8];
        let mut buffer = rotated_at_six(&mut backing);

        // Only the two slots before the physical end are handed out
        let mut source = Overreporting { fill: b'X', extra: 3 };
        assert_eq!(fill_from(&mut buffer, &mut source), Ok(2));
        assert_eq!(buffer.used_space(), 2);

        let mut out = [0u8; 8];
        assert_eq!(buffer.read(&mut out), 2);
        assert_eq!(&out[..2], b"XX");
    }

    #[test]
    fn test_drain_into_clamps_overreported_count() {
        let mut backing = [0u8; 8];
        let mut buffer = rotated_at_six(&mut backing);
        buffer.write(b"abcd");

        let mut sink = Overreporting { fill: 0, extra: 3 };
        assert_eq!(drain_into(&mut buffer, &mut sink), Ok(2));
        assert_eq!(buffer.used_space(), 2);
        assert_eq!(buffer.peek_at(0), Some(b'c'));
    }

    #[tokio::test]
    async fn test_async_helpers_clamp_overreported_count() {
        let mut backing = [0u8; 8];
        let mut buffer = rotated_at_six(&mut backing);

        let mut source = Overreporting { fill: b'Y', extra: 5 };
        assert_eq!(fill_from_async(&mut buffer, &mut source).await, Ok(2));
        assert_eq!(buffer.find_sequence(b"YY"), Some(0));

        let mut sink = Overreporting { fill: 0, extra: 5 };
        assert_eq!(drain_into_async(&mut buffer, &mut sink).await, Ok(2));
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn test_fill_from_async_then_read_line() {
        let mut buffer = RingBuffer::new(32).unwrap();
        let mut source = ChunkedSource {
            data: b"+IPD,5:hello\r\n",
            chunk: 3,
        };

        let mut line = [0u8; 32];
        let mut got = 0;
        while got == 0 {
            let n = fill_from_async(&mut buffer, &mut source).await.unwrap();
            assert!(n > 0, "source ran dry before a line was complete");
            got = buffer.read_line(&mut line);
        }
        assert_eq!(&line[..got], b"+IPD,5:hello\r\n");
    }

    #[tokio::test]
    async fn test_async_traits_and_drain() {
        let mut buffer = RingBuffer::new(8).unwrap();
        let written = embedded_io_async::Write::write(&mut buffer, b"ping")
            .await
            .unwrap();
        assert_eq!(written, 4);

        let mut sink = Collector {
            bytes: std::vec::Vec::new(),
            limit: usize::MAX,
        };
        assert_eq!(drain_into_async(&mut buffer, &mut sink).await, Ok(4));
        assert_eq!(sink.bytes, b"ping");

        let mut out = [0u8; 4];
        let read = embedded_io_async::Read::read(&mut buffer, &mut out)
            .await
            .unwrap();
        assert_eq!(read, 0);
    }
}
