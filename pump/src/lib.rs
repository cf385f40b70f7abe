//! # Hosted Line Pump
//!
//! Host-side driver glue for `ringline`. A pump owns a self-allocated
//! [`ringline::RingBuffer`], fills it from a byte stream and hands out
//! delimited lines, e.g. AT command responses from a UART bridge.
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────┐  fill   ┌────────────┐  take_line  ┌──────────────┐
//! │ serial/socket│────────►│ RingBuffer │────────────►│ command layer│
//! │  (Read /     │         │ (assembler)│             │  Vec<u8>     │
//! │  AsyncRead)  │         └────────────┘             └──────────────┘
//! └──────────────┘
//! ```
//!
//! ## Logging
//!
//! Progress goes through the `log` facade: `debug!` per fill, `warn!` when a
//! line is cut before its delimiter, `info!` at end of stream. Install any
//! `log` backend to see it.

pub mod assembler;
pub mod async_pump;
pub mod config;
pub mod error;
pub mod pump;

pub use assembler::{LineAssembler, PumpStats};
pub use async_pump::AsyncLinePump;
pub use config::PumpConfig;
pub use error::{PumpError, PumpResult};
pub use pump::{LinePump, Lines};
