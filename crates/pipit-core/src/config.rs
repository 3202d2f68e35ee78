//! Runtime tuning knobs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Values a port channel buffers before the writer blocks.
    pub channel_capacity: usize,
    /// Writes a byte pipe buffers before the writer blocks.
    pub pipe_capacity: usize,
    /// Default tracing filter when `PIPIT_LOG` is unset.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            channel_capacity: 32,
            pipe_capacity: 16,
            log_level: "warn".to_string(),
        }
    }
}
