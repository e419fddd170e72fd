// src/buffer/encoding.rs

//! Byte-to-text decoding policies.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::config::ReadSection;
use crate::errors::{Result, SimrunError};

/// How raw bytes are turned into text.
///
/// The two policies differ on ambiguous or malformed content: `Fixed`
/// decodes strictly with a configured encoding and fails on malformed
/// input, while `AutoDetect` sniffs the bytes first and substitutes
/// replacement characters instead of failing.
#[derive(Debug, Clone, Copy)]
pub enum EncodingPolicy {
    Fixed(&'static Encoding),
    AutoDetect,
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        EncodingPolicy::Fixed(UTF_8)
    }
}

impl EncodingPolicy {
    /// Fixed policy from an encoding label such as `"utf-8"` or
    /// `"latin1"`.
    pub fn fixed_from_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.as_bytes())
            .map(EncodingPolicy::Fixed)
            .ok_or_else(|| SimrunError::Config(format!("unknown encoding label '{label}'")))
    }

    /// Policy described by the `[read]` config section.
    pub fn from_config(section: &ReadSection) -> Result<Self> {
        match section.encoding.as_str() {
            "fixed" => Self::fixed_from_label(&section.charset),
            "auto-detect" => Ok(EncodingPolicy::AutoDetect),
            other => Err(SimrunError::Config(format!(
                "unknown encoding mode '{other}'; expected \"fixed\" or \"auto-detect\""
            ))),
        }
    }

    /// Decode `bytes` according to the policy.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            EncodingPolicy::Fixed(encoding) => {
                let (text, _, had_errors) = encoding.decode(bytes);
                if had_errors {
                    return Err(SimrunError::Decode {
                        encoding: encoding.name().to_string(),
                    });
                }
                Ok(text.into_owned())
            }
            EncodingPolicy::AutoDetect => {
                let mut detector = EncodingDetector::new();
                detector.feed(bytes, true);
                let encoding = detector.guess(None, true);
                debug!(encoding = encoding.name(), "detected encoding");
                let (text, _, _) = encoding.decode(bytes);
                Ok(text.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_utf8_rejects_malformed_bytes() {
        let policy = EncodingPolicy::default();
        assert_eq!(policy.decode("café".as_bytes()).unwrap(), "café");
        assert!(policy.decode(b"caf\xe9").is_err());
    }

    #[test]
    fn fixed_latin1_decodes_high_bytes() {
        let policy = EncodingPolicy::fixed_from_label("latin1").unwrap();
        assert_eq!(policy.decode(b"caf\xe9").unwrap(), "café");
    }

    #[test]
    fn auto_detect_never_fails() {
        let policy = EncodingPolicy::AutoDetect;
        let text = policy.decode(b"du caf\xe9 au lait, s'il vous pla\xeet").unwrap();
        assert!(text.starts_with("du caf"));
    }

    #[test]
    fn unknown_label_is_a_config_error() {
        match EncodingPolicy::fixed_from_label("no-such-charset") {
            Err(SimrunError::Config(msg)) => assert!(msg.contains("no-such-charset")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
