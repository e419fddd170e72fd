// src/sink.rs

//! Text sinks for relayed process output.
//!
//! A sink needs a line-write operation; flushing is an optional
//! capability with a no-op default, so buffered and unbuffered targets
//! share one trait.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{Level, debug, error, info, trace, warn};

/// Destination for relayed text.
///
/// `write_line` receives one chunk at a time, usually a full line with
/// its delimiter still attached. Sinks without a buffering layer keep
/// the default no-op `flush`.
pub trait TextSink: Send {
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink wrapping any `io::Write` target.
pub struct WriterSink<W: Write + Send>(W);

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write + Send> TextSink for WriterSink<W> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.0.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Sink forwarding each non-empty line to `tracing` at a fixed level.
///
/// Lines are trimmed before logging; blank lines are skipped.
pub struct LogSink {
    level: Level,
}

impl LogSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl TextSink for LogSink {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(());
        }
        if self.level == Level::ERROR {
            error!("{message}");
        } else if self.level == Level::WARN {
            warn!("{message}");
        } else if self.level == Level::INFO {
            info!("{message}");
        } else if self.level == Level::DEBUG {
            debug!("{message}");
        } else {
            trace!("{message}");
        }
        Ok(())
    }
}

/// Sink forwarding each non-empty trimmed line to a callback.
pub struct FnSink<F: FnMut(&str) + Send>(F);

impl<F: FnMut(&str) + Send> FnSink<F> {
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F: FnMut(&str) + Send> TextSink for FnSink<F> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let message = text.trim();
        if !message.is_empty() {
            (self.0)(message);
        }
        Ok(())
    }
}

/// Cloneable handle allowing two writers to target the same underlying
/// sink.
///
/// The supervisor uses this to share one stdout sink between the stdout
/// relay and its own heartbeat writes.
pub struct SharedSink<S: TextSink>(Arc<Mutex<S>>);

impl<S: TextSink> SharedSink<S> {
    pub fn new(inner: S) -> Self {
        Self(Arc::new(Mutex::new(inner)))
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<S: TextSink> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S: TextSink> TextSink for SharedSink<S> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lock().write_line(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_forwards_bytes_verbatim() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("a line\n").unwrap();
        sink.write_line("another\n").unwrap();
        assert_eq!(sink.into_inner(), b"a line\nanother\n");
    }

    #[test]
    fn fn_sink_trims_and_skips_blank_lines() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink::new(|line: &str| seen.push(line.to_string()));
            sink.write_line("  hello  \n").unwrap();
            sink.write_line("\n").unwrap();
            sink.write_line("world\n").unwrap();
        }
        assert_eq!(seen, vec!["hello", "world"]);
    }

    #[test]
    fn shared_sink_clones_write_to_the_same_target() {
        let shared = SharedSink::new(WriterSink::new(Vec::new()));
        let mut a = shared.clone();
        let mut b = shared.clone();
        a.write_line("from a\n").unwrap();
        b.write_line("from b\n").unwrap();
        let text = {
            let guard = shared.lock();
            String::from_utf8(guard.0.clone()).unwrap()
        };
        assert_eq!(text, "from a\nfrom b\n");
    }
}
