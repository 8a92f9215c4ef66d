//! Minimal 2D browser game engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! frame loop driven by `requestAnimationFrame`: every tick it measures the
//! elapsed time, tracks the keys currently held down, and dispatches four
//! ordered phases (handle input, update, fixed update, render) first to the
//! game-level callbacks and then to every registered [`entity::Entity`].
//! Everything except the browser driver is plain Rust, so the loop, the
//! geometry helpers and the sprite math are testable natively against any
//! [`surface::Surface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`game_loop`] | Browser driver [`game_loop::GameLoop`] and testable [`game_loop::LoopCore`] |
//! | [`entity`] | Entity capability trait and the insertion-ordered registry |
//! | [`toolbox`] | Per-call bundles handed to callbacks and hooks, deferred commands |
//! | [`context`] | Shared key/value store living as long as the loop |
//! | [`input`] | Set of currently pressed keys |
//! | [`geometry`] | Vectors, dimensions, bounding boxes, canvas-space conversion |
//! | [`collision`] | Axis-aligned overlap tests between entities |
//! | [`surface`] | Drawing contract, canvas clearing, image-handle cache |
//! | [`canvas`] | `web-sys` implementation of [`surface::Surface`] |
//! | [`sprite`] | Single-image sprites and sprite sheets |
//! | [`config`] | Loop configuration |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared constants |

pub mod canvas;
pub mod collision;
pub mod config;
pub mod consts;
pub mod context;
pub mod entity;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod sprite;
pub mod surface;
pub mod toolbox;

#[cfg(test)]
mod recording;

pub use error::EngineError;
