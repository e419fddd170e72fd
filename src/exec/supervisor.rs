// src/exec/supervisor.rs

//! Child process launcher with output relaying and a heartbeat.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::RunSection;
use crate::errors::{Result, SimrunError};
use crate::exec::relay::RelayHandle;
use crate::sink::{SharedSink, TextSink};

/// Message written to the stdout sink at every heartbeat unless the
/// caller overrides it.
pub const DEFAULT_BEAT_MESSAGE: &str = "subprocess is still running\n";

/// Command to execute: either an explicit argument vector, or a single
/// string interpreted by the platform shell.
#[derive(Debug, Clone)]
pub enum CommandLine {
    Argv(Vec<String>),
    Shell(String),
}

impl CommandLine {
    fn to_command(&self) -> Result<Command> {
        match self {
            CommandLine::Argv(argv) => {
                let (program, args) = argv.split_first().ok_or_else(|| {
                    SimrunError::Config("empty argument vector".to_string())
                })?;
                let mut cmd = Command::new(program);
                cmd.args(args);
                Ok(cmd)
            }
            CommandLine::Shell(line) => {
                // Build a shell command appropriate for the platform.
                if cfg!(windows) {
                    let mut cmd = Command::new("cmd");
                    cmd.arg("/C").arg(line);
                    Ok(cmd)
                } else {
                    let mut cmd = Command::new("sh");
                    cmd.arg("-c").arg(line);
                    Ok(cmd)
                }
            }
        }
    }

    fn display(&self) -> String {
        match self {
            CommandLine::Argv(argv) => argv.join(" "),
            CommandLine::Shell(line) => line.clone(),
        }
    }
}

/// Options for one supervised run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Working directory for the child; inherited when `None`.
    pub cwd: Option<PathBuf>,

    /// If set, `beat_message` is written to the stdout sink whenever the
    /// process is still running after this long. `None` waits silently.
    pub beat_period: Option<Duration>,

    /// Message written at every beat.
    pub beat_message: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            beat_period: None,
            beat_message: DEFAULT_BEAT_MESSAGE.to_string(),
        }
    }
}

impl RunOptions {
    /// Heartbeat defaults from the `[run]` config section.
    pub fn from_config(section: &RunSection) -> Self {
        Self {
            cwd: None,
            beat_period: section.beat_period_secs.map(Duration::from_secs_f64),
            beat_message: section.beat_message.clone(),
        }
    }
}

/// Run `command` to completion, relaying its stdout and stderr to the
/// given sinks, and return its exit code.
///
/// Both streams are captured (not inherited) and drained by one relay
/// task each, running in parallel with the wait loop. When
/// `options.beat_period` is set and elapses before the process exits,
/// `options.beat_message` is written to the stdout sink and the wait
/// restarts, producing a heartbeat for however long the process runs.
///
/// A spawn failure surfaces as [`SimrunError::ProcessStart`] before any
/// relay is started. A non-zero exit code is a normal result, not an
/// error; `-1` is returned for a process killed by a signal.
pub async fn run_subprocess<O, E>(
    command: &CommandLine,
    options: &RunOptions,
    stdout_sink: O,
    stderr_sink: E,
) -> Result<i32>
where
    O: TextSink + 'static,
    E: TextSink + 'static,
{
    info!(cmd = %command.display(), "starting subprocess");

    let mut cmd = command.to_command()?;
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(ref cwd) = options.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| SimrunError::ProcessStart {
        command: command.display(),
        source,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // The stdout sink is shared between its relay and the heartbeat
    // writes below.
    let mut shared_stdout = SharedSink::new(stdout_sink);

    let out_relay = stdout.map(|s| RelayHandle::spawn(s, shared_stdout.clone()));
    let err_relay = stderr.map(|s| RelayHandle::spawn(s, stderr_sink));

    let status_res = wait_with_heartbeat(&mut child, options, &mut shared_stdout).await;

    // If the wait loop failed while the child is still alive, kill it so
    // the pipes close and the relays' in-flight reads can return.
    if status_res.is_err() {
        if let Err(e) = child.kill().await {
            warn!(error = %e, "failed to kill child process after wait error");
        }
    }

    // Relays are stopped and joined on every path before the wait result
    // is surfaced.
    if let Some(relay) = out_relay {
        relay.stop().await;
    }
    if let Some(relay) = err_relay {
        relay.stop().await;
    }

    let status = status_res?;
    let code = status.code().unwrap_or(-1);
    info!(exit_code = code, success = status.success(), "subprocess exited");
    Ok(code)
}

async fn wait_with_heartbeat<S: TextSink>(
    child: &mut Child,
    options: &RunOptions,
    stdout_sink: &mut S,
) -> Result<ExitStatus> {
    let Some(period) = options.beat_period else {
        return Ok(child.wait().await?);
    };

    loop {
        match timeout(period, child.wait()).await {
            Ok(status) => return Ok(status?),
            Err(_elapsed) => {
                debug!("heartbeat period elapsed; process still running");
                stdout_sink.write_line(&options.beat_message)?;
                stdout_sink.flush()?;
            }
        }
    }
}
