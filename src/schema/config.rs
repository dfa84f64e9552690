//! Recorder configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a recording session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Frame rate stamped on clips built from a recording.
    pub frame_rate: u32,
    /// Capture position channels on every bone, not just the root.
    ///
    /// Extra non-root position curves flow into the playable clip but are
    /// not persisted; the binary format stores root positions only.
    #[serde(default)]
    pub record_positions: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            record_positions: false,
        }
    }
}

impl RecorderConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Frame rate must be non-zero")]
    InvalidFrameRate,
}
