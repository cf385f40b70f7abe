//! Blocking line pump over any [`std::io::Read`] source.

use std::io::{ErrorKind, Read};

use log::debug;

use crate::assembler::{LineAssembler, PumpStats};
use crate::config::PumpConfig;
use crate::error::{PumpError, PumpResult};

/// Pulls bytes from a reader into a ring buffer and hands out lines
///
/// ```rust
/// use ringline_pump::{LinePump, PumpConfig};
///
/// let source: &[u8] = b"AT\r\nOK\r\n";
/// let mut pump = LinePump::new(source, PumpConfig::default()).unwrap();
/// assert_eq!(pump.next_line().unwrap().unwrap(), b"AT\r\n");
/// assert_eq!(pump.next_line().unwrap().unwrap(), b"OK\r\n");
/// assert!(pump.next_line().unwrap().is_none());
/// ```
pub struct LinePump<R> {
    source: R,
    assembler: LineAssembler,
}

impl<R: Read> LinePump<R> {
    pub fn new(source: R, config: PumpConfig) -> PumpResult<Self> {
        Ok(Self {
            source,
            assembler: LineAssembler::new(config)?,
        })
    }

    /// Read once from the source into the buffer's free space
    ///
    /// Returns the number of bytes added. `Ok(0)` means the buffer is full or
    /// the source has ended.
    pub fn fill(&mut self) -> PumpResult<usize> {
        if self.assembler.is_eof() {
            return Ok(0);
        }

        let region = self.assembler.free_region();
        if region.is_empty() {
            return Ok(0);
        }

        let room = region.len();
        let n = loop {
            match self.source.read(region) {
                Ok(n) => break n.min(room),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PumpError::Io(e)),
            }
        };

        if n == 0 {
            self.assembler.mark_eof();
            return Ok(0);
        }

        self.assembler.commit(n)?;
        debug!(
            "pumped {} bytes ({} buffered)",
            n,
            self.assembler.buffer().used_space()
        );
        Ok(n)
    }

    /// Block until a line is ready or the source ends
    ///
    /// Returns `Ok(None)` once the source has ended and every buffered byte
    /// was handed out.
    pub fn next_line(&mut self) -> PumpResult<Option<Vec<u8>>> {
        loop {
            if let Some(line) = self.assembler.take_line() {
                return Ok(Some(line));
            }
            if self.assembler.is_eof() {
                return Ok(None);
            }
            self.fill()?;
        }
    }

    /// Iterate over lines until the source ends
    pub fn lines(&mut self) -> Lines<'_, R> {
        Lines { pump: self }
    }

    pub fn stats(&self) -> PumpStats {
        self.assembler.stats()
    }

    pub fn assembler(&self) -> &LineAssembler {
        &self.assembler
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Iterator returned by [`LinePump::lines`]
pub struct Lines<'p, R> {
    pump: &'p mut LinePump<R>,
}

impl<R: Read> Iterator for Lines<'_, R> {
    type Item = PumpResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pump.next_line().transpose()
    }
}
