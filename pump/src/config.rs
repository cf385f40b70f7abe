//! Pump configuration, loadable from JSON.

use ringline::BufferConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PumpError, PumpResult};

/// Configuration for a line pump
///
/// Missing JSON fields fall back to [`PumpConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// Ring buffer slots (one is always reserved)
    pub capacity: usize,
    /// Line delimiter byte
    pub delimiter: u8,
    /// Line scratch size; longer lines are cut at `max_line - 1` bytes
    pub max_line: usize,
    /// Drop the delimiter from complete lines
    pub strip_delimiter: bool,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            delimiter: ringline::DEFAULT_DELIMITER,
            max_line: 256,
            strip_delimiter: false,
        }
    }
}

impl PumpConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> PumpResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for the underlying ring buffer
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig::new(self.capacity).with_delimiter(self.delimiter)
    }

    pub fn validate(&self) -> PumpResult<()> {
        self.buffer_config().validate()?;
        if self.max_line < 2 {
            return Err(PumpError::Config(format!(
                "max_line must be at least 2, got {}",
                self.max_line
            )));
        }
        Ok(())
    }
}
