//! Async line pump over any [`tokio::io::AsyncRead`] source.

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::assembler::{LineAssembler, PumpStats};
use crate::config::PumpConfig;
use crate::error::PumpResult;

/// Async counterpart of [`LinePump`](crate::LinePump)
pub struct AsyncLinePump<R> {
    source: R,
    assembler: LineAssembler,
}

impl<R: AsyncRead + Unpin> AsyncLinePump<R> {
    pub fn new(source: R, config: PumpConfig) -> PumpResult<Self> {
        Ok(Self {
            source,
            assembler: LineAssembler::new(config)?,
        })
    }

    /// Read once from the source into the buffer's free space
    pub async fn fill(&mut self) -> PumpResult<usize> {
        if self.assembler.is_eof() {
            return Ok(0);
        }

        let region = self.assembler.free_region();
        if region.is_empty() {
            return Ok(0);
        }

        let room = region.len();
        let n = self.source.read(region).await?.min(room);
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

    /// Wait until a line is ready or the source ends
    pub async fn next_line(&mut self) -> PumpResult<Option<Vec<u8>>> {
        loop {
            if let Some(line) = self.assembler.take_line() {
                return Ok(Some(line));
            }
            if self.assembler.is_eof() {
                return Ok(None);
            }
            self.fill().await?;
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_async_lines_until_eof() {
        let source: &[u8] = b"+CIFSR:STAIP,\"10.0.0.7\"\r\nOK\r\nbye";
        let mut pump = AsyncLinePump::new(source, PumpConfig::default()).unwrap();

        let mut lines = Vec::new();
        while let Some(line) = pump.next_line().await.unwrap() {
            lines.push(line);
        }
        assert_eq!(
            lines,
            vec![
                b"+CIFSR:STAIP,\"10.0.0.7\"\r\n".to_vec(),
                b"OK\r\n".to_vec(),
                b"bye".to_vec(),
            ]
        );
        assert_eq!(pump.stats().lines_out, 3);
    }

    #[tokio::test]
    async fn test_async_pump_over_duplex() {
        let (mut device, host) = tokio::io::duplex(64);
        let config = PumpConfig {
            delimiter: b';',
            strip_delimiter: true,
            ..PumpConfig::default()
        };
        let mut pump = AsyncLinePump::new(host, config).unwrap();

        device.write_all(b"led=on;").await.unwrap();
        assert_eq!(pump.next_line().await.unwrap().unwrap(), b"led=on");

        device.write_all(b"led=off;").await.unwrap();
        drop(device);
        assert_eq!(pump.next_line().await.unwrap().unwrap(), b"led=off");
        assert!(pump.next_line().await.unwrap().is_none());
    }
}
