//! Loop configuration.
//!
//! `GameConfig` carries the options that are not callbacks: the debug switch
//! and two reserved pacing knobs. It can be built in code or parsed from a JSON
//! string handed over by the host page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GameConfig {
    /// Emit `[•]` debug traces for key events.
    pub debug: bool,
    /// Fixed step in seconds for a future accumulator. Parsed, not used by the loop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_time_step: Option<f64>,
    /// Frame-rate cap for a future limiter. Parsed, not used by the loop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps_limit: Option<u32>,
}

impl GameConfig {
    /// Parse a config from JSON. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] on malformed JSON or unknown keys.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Turn on debug tracing.
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}
