//! Browser entry point.

use std::cell::RefCell;

use jetpack::config::GameConfig;
use jetpack::game_loop::GameLoop;
use jetpack::surface::Surface;
use wasm_bindgen::prelude::*;

use crate::game;

const CANVAS_ID: &str = "canvas";
const CONFIG: &str = include_str!("../config.json");

thread_local! {
    /// The running loop. Kept alive for the lifetime of the page.
    static GAME: RefCell<Option<GameLoop>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let config = GameConfig::from_json(CONFIG).map_err(to_js)?;
    let mut game_loop = GameLoop::from_element_id(CANVAS_ID, game::callbacks(), config).map_err(to_js)?;

    let (width, height) = game_loop.with_surface(|surface| (surface.width(), surface.height())).ok_or_else(busy)?;
    game_loop
        .with_entities_mut(|entities| game::spawn_initial(entities, width, height))
        .ok_or_else(busy)?
        .map_err(to_js)?;

    game_loop.initialize().map_err(to_js)?;
    log::info!("playground started on a {width}x{height} canvas");

    GAME.with(|slot| *slot.borrow_mut() = Some(game_loop));
    Ok(())
}

fn busy() -> JsValue {
    JsValue::from_str("game loop is busy")
}

fn to_js(err: jetpack::EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
