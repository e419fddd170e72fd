// src/config/validate.rs

use crate::buffer::EncodingPolicy;
use crate::config::model::ConfigFile;
use crate::errors::{Result, SimrunError};

/// Semantic validation beyond TOML deserialization.
///
/// Checks that the heartbeat period (if any) is a positive finite
/// number, and that the `[read]` section resolves to an encoding
/// policy.
pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(period) = config.run.beat_period_secs {
        if !period.is_finite() || period <= 0.0 {
            return Err(SimrunError::Config(format!(
                "beat_period_secs must be a positive number, got {period}"
            )));
        }
    }

    EncodingPolicy::from_config(&config.read)?;

    Ok(())
}
