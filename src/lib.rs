// src/lib.rs

//! Subprocess supervision and input-buffer utilities.
//!
//! Three independent pieces, composed by the caller:
//!
//! - [`exec::relay`] — background tasks copying text lines from a
//!   readable stream to a [`sink::TextSink`], stoppable cooperatively.
//! - [`exec::supervisor`] — launches a child process with captured
//!   stdout/stderr, wires one relay per stream, emits a periodic
//!   heartbeat while the process is still running and returns its exit
//!   code.
//! - [`buffer`] — normalizes heterogeneous inputs (path string, literal
//!   text, raw bytes, open streams) into one uniform readable text
//!   stream, with a fixed or auto-detected decoding policy.

pub mod buffer;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod meta;
pub mod sink;

pub use buffer::{BufferOrPath, BufferResolver, EncodingPolicy, RawInput, ResolvedBuffer};
pub use errors::{Result, SimrunError};
pub use exec::{CommandLine, RelayHandle, RunOptions, run_subprocess};
pub use sink::{FnSink, LogSink, SharedSink, TextSink, WriterSink};
