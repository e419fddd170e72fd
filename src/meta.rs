// src/meta.rs

//! Generated-file banners and version-string parsing.

use chrono::{Datelike, Utc};

use crate::errors::{Result, SimrunError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multi-line banner stamped into generated files, each line prefixed
/// with the comment marker of the target format (e.g. `"! "`).
///
/// Ends with a blank line so content can follow directly.
pub fn multi_line_banner(prefix: &str) -> String {
    let rule = "-".repeat(45);
    let year = Utc::now().year();
    let body = format!(
        "{rule}\nGenerated by simrun version {VERSION}\nCopyright (c) {year}, simrun contributors\n{rule}"
    );
    let prefixed: String = body
        .lines()
        .map(|line| format!("{prefix}{line}\n"))
        .collect();
    format!("{prefixed}\n")
}

/// Single-line banner variant.
pub fn mono_line_banner() -> String {
    format!(
        "simrun version {} - copyright (c) {} - simrun contributors",
        VERSION,
        Utc::now().year()
    )
}

/// Parse `"x.y"`, `"x.y.z"` or `"x.y.z.w"` into a (major, minor, patch)
/// triple.
///
/// A missing patch defaults to 0; components past the third are
/// dropped.
pub fn parse_version(version_str: &str) -> Result<(u32, u32, u32)> {
    let malformed = || SimrunError::Config(format!("incorrect version format: {version_str}"));

    let mut parts = Vec::new();
    for piece in version_str.split('.') {
        let value: u32 = piece.trim().parse().map_err(|_| malformed())?;
        parts.push(value);
    }
    if parts.len() < 2 {
        return Err(malformed());
    }
    parts.push(0);

    Ok((parts[0], parts[1], parts[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_part_version_gets_zero_patch() {
        assert_eq!(parse_version("9.4").unwrap(), (9, 4, 0));
    }

    #[test]
    fn three_and_four_part_versions() {
        assert_eq!(parse_version("9.4.0").unwrap(), (9, 4, 0));
        assert_eq!(parse_version("9.4.0.1").unwrap(), (9, 4, 0));
    }

    #[test]
    fn malformed_versions_are_rejected() {
        assert!(parse_version("9").is_err());
        assert!(parse_version("").is_err());
        assert!(parse_version("9.x").is_err());
        assert!(parse_version("9..4").is_err());
    }

    #[test]
    fn multi_line_banner_prefixes_every_line() {
        let banner = multi_line_banner("! ");
        assert!(banner.ends_with("\n\n"));
        for line in banner.trim_end().lines() {
            assert!(line.starts_with("! "), "unprefixed line: {line:?}");
        }
        assert!(banner.contains(VERSION));
    }

    #[test]
    fn mono_line_banner_mentions_version() {
        assert!(mono_line_banner().contains(VERSION));
    }
}
