// src/exec/mod.rs

//! Subprocess execution layer.
//!
//! - [`relay`] owns the background tasks that copy lines from a captured
//!   child stream to a [`TextSink`](crate::sink::TextSink).
//! - [`supervisor`] launches the child process, wires one relay per
//!   captured stream and drives the heartbeat wait loop.

pub mod relay;
pub mod supervisor;

pub use relay::{DECODE_ERROR_PLACEHOLDER, RelayHandle};
pub use supervisor::{CommandLine, DEFAULT_BEAT_MESSAGE, RunOptions, run_subprocess};
