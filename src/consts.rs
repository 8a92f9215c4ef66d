//! Shared constants for the engine crate.

// ── Timing ──────────────────────────────────────────────────────

/// Host timestamps are in milliseconds; the loop reports seconds.
pub const MS_PER_SECOND: f64 = 1000.0;

// ── Logging ─────────────────────────────────────────────────────

/// Prefix for debug traces emitted when [`crate::config::GameConfig::debug`] is on.
pub const DEBUG_PREFIX: &str = "[•]";

// ── Browser ─────────────────────────────────────────────────────

/// Context id requested from the canvas element.
pub const CONTEXT_2D: &str = "2d";

/// Document event fired when a key goes down.
pub const KEY_DOWN_EVENT: &str = "keydown";

/// Document event fired when a key is released.
pub const KEY_UP_EVENT: &str = "keyup";
