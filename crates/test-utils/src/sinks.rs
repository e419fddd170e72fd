use std::io;
use std::sync::{Arc, Mutex};

use simrun::sink::TextSink;

/// A sink that records every written line and counts flushes.
///
/// Clones share the same backing storage, so a test can hand one clone
/// to a relay and keep another for assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
    flushes: Arc<Mutex<usize>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        self.lines().concat()
    }

    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl TextSink for RecordingSink {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// A sink whose writes always fail, for exercising relay error paths.
#[derive(Clone, Default)]
pub struct FailingSink;

impl TextSink for FailingSink {
    fn write_line(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink rejected write"))
    }
}
