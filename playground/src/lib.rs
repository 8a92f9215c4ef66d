//! # playground
//!
//! Demo game built on the `jetpack` engine. A player sprite walks with the
//! arrow keys and collects coins; Escape ends the loop. The game logic lives
//! in [`game`] and is surface-generic; the wasm entry point that binds it to
//! the page's `<canvas id="canvas">` is compiled only for `wasm32`.

pub mod game;

#[cfg(target_arch = "wasm32")]
mod web;
