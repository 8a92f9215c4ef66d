//! Crate error type.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

/// Error returned by fallible engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No canvas was supplied (or found in the document).
    #[error("canvas is not defined")]
    MissingCanvas,
    /// The canvas element refused to hand out a 2D rendering context.
    #[error("canvas 2d context is unavailable")]
    ContextUnavailable,
    /// An entity with this id is already registered.
    #[error("entity id already registered: {0}")]
    DuplicateEntity(String),
    /// A sprite sheet was asked to draw a frame it has no offset for.
    #[error("sprite sheet frame {frame} out of range (sheet has {frames} frames)")]
    FrameOutOfRange { frame: usize, frames: usize },
    /// A browser API call failed.
    #[error("javascript error: {0}")]
    Js(String),
    /// Configuration JSON could not be parsed.
    #[error("invalid game config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}
