// src/buffer/resolve.rs

//! Normalization of heterogeneous inputs into one readable text stream.

use std::io::{BufRead, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::buffer::encoding::EncodingPolicy;
use crate::errors::{Result, SimrunError};
use crate::fs::{FileSystem, RealFileSystem};

/// A readable text stream produced by the resolver.
pub type TextReader = Box<dyn BufRead + Send>;

/// The shapes of input the resolver accepts, one variant per shape.
pub enum RawInput {
    /// Either a path (when it ends in the expected extension) or literal
    /// content.
    Text(String),
    /// Raw bytes, decoded per the resolver's policy.
    Bytes(Vec<u8>),
    /// An already-decoded text stream, passed through unchanged.
    TextStream(TextReader),
    /// An undecoded byte stream, read to completion and decoded.
    ByteStream(Box<dyn Read + Send>),
}

/// Path-or-open-stream input for [`BufferResolver::to_buffer`].
pub enum BufferOrPath {
    Path(PathBuf),
    Buffer(TextReader),
}

/// Result of resolution: a uniform text stream plus the originating
/// path.
///
/// `path` is `Some` exactly when the input was a filesystem path. The
/// caller owns the reader.
pub struct ResolvedBuffer {
    pub reader: TextReader,
    pub path: Option<PathBuf>,
}

/// Resolves inputs against a filesystem with a decoding policy.
///
/// The policy is threaded in explicitly; there is no global encoding
/// state.
pub struct BufferResolver {
    fs: Arc<dyn FileSystem>,
    policy: EncodingPolicy,
}

impl BufferResolver {
    pub fn new(fs: Arc<dyn FileSystem>, policy: EncodingPolicy) -> Self {
        Self { fs, policy }
    }

    /// Resolver over the real filesystem.
    pub fn with_policy(policy: EncodingPolicy) -> Self {
        Self::new(Arc::new(RealFileSystem), policy)
    }

    /// Classify `input` and produce a uniform readable text stream.
    ///
    /// Only a `Text` value ending in `.<expected_extension>` is treated
    /// as a path; any other text is literal content, even if a file of
    /// that name happens to exist.
    pub fn resolve(&self, input: RawInput, expected_extension: &str) -> Result<ResolvedBuffer> {
        match input {
            RawInput::Text(text) => {
                if text.ends_with(&format!(".{expected_extension}")) {
                    let path = PathBuf::from(&text);
                    let reader = self.open_path(&path)?;
                    Ok(ResolvedBuffer {
                        reader,
                        path: Some(path),
                    })
                } else {
                    Ok(ResolvedBuffer {
                        reader: in_memory(text),
                        path: None,
                    })
                }
            }
            RawInput::Bytes(bytes) => {
                let text = self.policy.decode(&bytes)?;
                Ok(ResolvedBuffer {
                    reader: in_memory(text),
                    path: None,
                })
            }
            RawInput::TextStream(reader) => Ok(ResolvedBuffer { reader, path: None }),
            RawInput::ByteStream(mut stream) => {
                let mut bytes = Vec::new();
                stream.read_to_end(&mut bytes)?;
                let text = self.policy.decode(&bytes)?;
                Ok(ResolvedBuffer {
                    reader: in_memory(text),
                    path: None,
                })
            }
        }
    }

    /// Path-or-buffer variant for call sites that never pass literal
    /// content: the path branch reuses the open/decode logic, the
    /// buffer branch passes through.
    pub fn to_buffer(&self, input: BufferOrPath) -> Result<(Option<PathBuf>, TextReader)> {
        match input {
            BufferOrPath::Path(path) => {
                let reader = self.open_path(&path)?;
                Ok((Some(path), reader))
            }
            BufferOrPath::Buffer(reader) => Ok((None, reader)),
        }
    }

    fn open_path(&self, path: &Path) -> Result<TextReader> {
        if !self.fs.is_file(path) {
            return Err(SimrunError::NotFound(path.to_path_buf()));
        }
        let bytes = self.fs.read_to_bytes(path)?;
        debug!(path = %path.display(), size = bytes.len(), "opened input file");
        let text = self.policy.decode(&bytes)?;
        Ok(in_memory(text))
    }
}

fn in_memory(text: String) -> TextReader {
    Box::new(Cursor::new(text.into_bytes()))
}
