// src/buffer/write.rs

//! Write-side dual of the resolver: render content to a returned
//! string, an already-open writer, or a file path.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;

use crate::errors::Result;

/// Destination for [`multi_mode_write`].
pub enum WriteTarget {
    /// Create (or truncate) a file at this path and stream into it.
    Path(PathBuf),
    /// Stream into an already-open writer.
    Buffer(Box<dyn Write + Send>),
}

/// Render content either to a returned `String` (no target) or into the
/// given target (`Ok(None)` in that case).
///
/// `buffer_writer` streams the content into a writer; `string_writer`
/// renders it as one string. Only one of the two runs.
pub fn multi_mode_write<B, S>(
    buffer_writer: B,
    string_writer: S,
    target: Option<WriteTarget>,
) -> Result<Option<String>>
where
    B: FnOnce(&mut dyn Write) -> Result<()>,
    S: FnOnce() -> Result<String>,
{
    match target {
        None => Ok(Some(string_writer()?)),
        Some(WriteTarget::Path(path)) => {
            let file =
                File::create(&path).with_context(|| format!("creating file {:?}", path))?;
            let mut writer = BufWriter::new(file);
            buffer_writer(&mut writer)?;
            writer.flush()?;
            Ok(None)
        }
        Some(WriteTarget::Buffer(mut writer)) => {
            buffer_writer(&mut writer)?;
            writer.flush()?;
            Ok(None)
        }
    }
}
