// src/buffer/mod.rs

//! Input and output buffer normalization.
//!
//! - [`resolve`] turns any accepted input shape into one uniform
//!   readable text stream.
//! - [`encoding`] holds the byte-to-text decoding policies.
//! - [`write`] is the write-side counterpart (string, open writer, or
//!   file path targets).

pub mod encoding;
pub mod resolve;
pub mod write;

pub use encoding::EncodingPolicy;
pub use resolve::{BufferOrPath, BufferResolver, RawInput, ResolvedBuffer, TextReader};
pub use write::{WriteTarget, multi_mode_write};
