// src/exec/relay.rs

//! Background line relay from a readable stream to a text sink.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::sink::TextSink;

/// Forwarded in place of a line that is not valid text.
pub const DECODE_ERROR_PLACEHOLDER: &str = "unicode decode error";

/// Handle to a running relay task.
///
/// While the handle is held, every complete line that appears on the
/// source is forwarded to the sink as soon as it is available. Dropping
/// the handle does not stop the task; call [`RelayHandle::stop`] to
/// request a stop and wait for the task to exit.
pub struct RelayHandle {
    stop_flag: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl RelayHandle {
    /// Spawn a relay copying lines from `source` to `sink`.
    ///
    /// The relay runs until the source signals end-of-stream or a stop
    /// is requested, whichever comes first.
    pub fn spawn<R, S>(source: R, sink: S) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        S: TextSink + 'static,
    {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop_flag);
        let task = tokio::spawn(async move {
            relay_loop(source, sink, flag).await;
        });
        Self { stop_flag, task }
    }

    /// Request a cooperative stop and wait for the relay task to exit.
    ///
    /// The flag is only observed between line reads, so this may wait
    /// for one in-flight read to complete; that read returns naturally
    /// when the source stream closes.
    pub async fn stop(self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Err(e) = self.task.await {
            error!(error = %e, "relay task panicked or was aborted");
        }
    }
}

async fn relay_loop<R, S>(source: R, mut sink: S, stop_flag: Arc<AtomicBool>)
where
    R: AsyncRead + Unpin + Send,
    S: TextSink,
{
    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();

    while !stop_flag.load(Ordering::Relaxed) {
        buf.clear();
        let n = match reader.read_until(b'\n', &mut buf).await {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "relay read failed; stopping");
                break;
            }
        };
        if n == 0 {
            // Source exhausted.
            break;
        }

        // A line that does not decode is replaced wholesale, so the sink
        // never sees a partial multi-byte sequence.
        let line = match std::str::from_utf8(&buf) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "could not decode line from stream");
                DECODE_ERROR_PLACEHOLDER
            }
        };

        if let Err(e) = sink.write_line(line).and_then(|()| sink.flush()) {
            error!(error = %e, "relay sink write failed; stopping");
            break;
        }
    }

    debug!("relay loop ended");
}
