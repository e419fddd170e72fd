// src/config/model.rs

use serde::Deserialize;

use crate::exec::supervisor::DEFAULT_BEAT_MESSAGE;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [run]
/// beat_period_secs = 10.0
/// beat_message = "subprocess is still running\n"
///
/// [read]
/// encoding = "fixed"
/// charset = "utf-8"
/// ```
///
/// All sections are optional and have reasonable defaults. The sections
/// only supply *defaults*; the supervisor and resolver always take
/// explicit values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Heartbeat defaults from `[run]`.
    #[serde(default)]
    pub run: RunSection,

    /// Decoding defaults from `[read]`.
    #[serde(default)]
    pub read: ReadSection,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Heartbeat period in seconds; absent means no heartbeat.
    #[serde(default)]
    pub beat_period_secs: Option<f64>,

    /// Message written to the stdout sink at every beat.
    #[serde(default = "default_beat_message")]
    pub beat_message: String,
}

fn default_beat_message() -> String {
    DEFAULT_BEAT_MESSAGE.to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            beat_period_secs: None,
            beat_message: default_beat_message(),
        }
    }
}

/// `[read]` section: how raw bytes become text in the buffer resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadSection {
    /// `"fixed"` or `"auto-detect"`.
    #[serde(default = "default_encoding_mode")]
    pub encoding: String,

    /// Charset label used when `encoding = "fixed"`.
    #[serde(default = "default_charset")]
    pub charset: String,
}

fn default_encoding_mode() -> String {
    "fixed".to_string()
}

fn default_charset() -> String {
    "utf-8".to_string()
}

impl Default for ReadSection {
    fn default() -> Self {
        Self {
            encoding: default_encoding_mode(),
            charset: default_charset(),
        }
    }
}
