//! Line assembly shared by the blocking and async pumps.
//!
//! The assembler owns the ring buffer. Pumps hand it raw bytes through
//! [`LineAssembler::free_region`] / [`LineAssembler::commit`] and pull lines
//! with [`LineAssembler::take_line`], which keeps the buffer's policy of
//! waiting for a delimiter unless the line is already too long or the
//! buffer is full.

use log::{info, warn};
use ringline::RingBuffer;

use crate::config::PumpConfig;
use crate::error::PumpResult;

/// Counters for a pump
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    /// Bytes received from the source
    pub bytes_in: u64,
    /// Lines handed out, including partial ones
    pub lines_out: u64,
    /// Lines cut before their delimiter arrived
    pub forced_flushes: u64,
}

/// Ring buffer plus line bookkeeping shared by both pumps
pub struct LineAssembler {
    buffer: RingBuffer<'static>,
    config: PumpConfig,
    scratch: Vec<u8>,
    stats: PumpStats,
    eof: bool,
}

impl LineAssembler {
    pub fn new(config: PumpConfig) -> PumpResult<Self> {
        config.validate()?;
        let buffer = RingBuffer::from_config(&config.buffer_config())?;
        Ok(Self {
            buffer,
            scratch: vec![0; config.max_line],
            config,
            stats: PumpStats::default(),
            eof: false,
        })
    }

    pub fn buffer(&self) -> &RingBuffer<'static> {
        &self.buffer
    }

    pub fn config(&self) -> &PumpConfig {
        &self.config
    }

    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    /// Whether the source reported end of stream
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Contiguous free space for the next source read
    pub(crate) fn free_region(&mut self) -> &mut [u8] {
        self.buffer.writable_split_mut(usize::MAX).first
    }

    /// Make `n` bytes written into [`Self::free_region`] readable
    pub(crate) fn commit(&mut self, n: usize) -> PumpResult<()> {
        self.buffer.commit(n)?;
        self.stats.bytes_in += n as u64;
        Ok(())
    }

    pub(crate) fn mark_eof(&mut self) {
        if !self.eof {
            info!(
                "end of stream after {} bytes, {} still buffered",
                self.stats.bytes_in,
                self.buffer.used_space()
            );
        }
        self.eof = true;
    }

    /// Next line, or `None` until one is ready
    ///
    /// After end of stream, bytes left without a delimiter come out as a
    /// final partial line.
    pub fn take_line(&mut self) -> Option<Vec<u8>> {
        let mut n = self.buffer.read_line(&mut self.scratch);
        let remainder = n == 0 && self.eof;
        if remainder {
            let limit = self.scratch.len() - 1;
            n = self.buffer.read(&mut self.scratch[..limit]);
        }
        if n == 0 {
            return None;
        }

        let mut line = self.scratch[..n].to_vec();
        let complete = line.last() == Some(&self.buffer.delimiter());
        if complete && self.config.strip_delimiter {
            line.pop();
        } else if !complete && !remainder {
            self.stats.forced_flushes += 1;
            warn!(
                "flushed {} bytes without a delimiter ({} still buffered)",
                n,
                self.buffer.used_space()
            );
        }

        self.stats.lines_out += 1;
        Some(line)
    }
}
