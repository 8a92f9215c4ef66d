#![allow(clippy::float_cmp)]

use std::cell::RefCell;

use jetpack::config::GameConfig;
use jetpack::entity::Entities;
use jetpack::game_loop::{LoopCore, TickOutcome};
use jetpack::geometry::Rect;
use jetpack::input::Key;
use jetpack::EngineError;

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Square field that remembers what was drawn.
struct Field {
    size: f64,
    clears: RefCell<usize>,
    blits: RefCell<Vec<(String, Option<Rect>, Rect)>>,
}

impl Field {
    fn new(size: f64) -> Self {
        Self { size, clears: RefCell::new(0), blits: RefCell::new(Vec::new()) }
    }
}

impl Surface for Field {
    fn width(&self) -> f64 {
        self.size
    }

    fn height(&self) -> f64 {
        self.size
    }

    fn clear_rect(&self, _rect: Rect) {
        *self.clears.borrow_mut() += 1;
    }

    fn draw_image(&self, source: &str, crop: Option<Rect>, dest: Rect) -> Result<(), EngineError> {
        self.blits.borrow_mut().push((source.to_owned(), crop, dest));
        Ok(())
    }
}

fn started(size: f64) -> LoopCore<Field> {
    let mut entities = Entities::new();
    spawn_initial(&mut entities, size, size).expect("spawn");
    let mut core = LoopCore::new(Field::new(size), callbacks(), GameConfig::default()).with_entities(entities);
    core.initialize(0.0);
    core
}

fn player_location(core: &LoopCore<Field>) -> Vector2D {
    core.entities().get(PLAYER_ID).map(|p| p.location()).expect("player")
}

fn keys(held: &[&str]) -> PressedKeys {
    let mut keys = PressedKeys::new();
    for key in held {
        keys.press(&Key::from(*key));
    }
    keys
}

// =============================================================
// Pure helpers
// =============================================================

#[test]
fn direction_from_arrow_keys() {
    assert_eq!(direction(&keys(&[])), Vector2D::new(0.0, 0.0));
    assert_eq!(direction(&keys(&["ArrowLeft"])), Vector2D::new(-1.0, 0.0));
    assert_eq!(direction(&keys(&["ArrowUp", "ArrowRight"])), Vector2D::new(1.0, 1.0));
    assert_eq!(direction(&keys(&["ArrowDown"])), Vector2D::new(0.0, -1.0));
}

#[test]
fn opposite_keys_cancel() {
    assert_eq!(direction(&keys(&["ArrowLeft", "ArrowRight"])), Vector2D::new(0.0, 0.0));
}

#[test]
fn clamp_keeps_box_inside_field() {
    let dims = Dimensions2D::new(10.0, 10.0);
    assert_eq!(clamp_to_field(Vector2D::new(-20.0, 50.0), dims, 100.0, 80.0), Vector2D::new(5.0, 50.0));
    assert_eq!(clamp_to_field(Vector2D::new(99.0, 200.0), dims, 100.0, 80.0), Vector2D::new(95.0, 75.0));
}

#[test]
fn clamp_on_field_smaller_than_box_pins_to_half_size() {
    let dims = Dimensions2D::new(10.0, 10.0);
    assert_eq!(clamp_to_field(Vector2D::new(3.0, 3.0), dims, 4.0, 4.0), Vector2D::new(5.0, 5.0));
}

#[test]
fn coin_spots_cycle() {
    assert_eq!(coin_spot(0, 100.0, 100.0), Vector2D::new(80.0, 50.0));
    assert_eq!(coin_spot(5, 100.0, 100.0), coin_spot(0, 100.0, 100.0));
}

// =============================================================
// Game on a loop
// =============================================================

#[test]
fn init_seeds_score_and_fps() {
    let core = started(100.0);
    assert_eq!(core.context().get::<u32>(SCORE_KEY), Some(&0));
    assert_eq!(core.context().get::<f64>(FPS_KEY), Some(&0.0));
}

#[test]
fn update_publishes_fps() {
    let mut core = started(100.0);
    core.tick(20.0);
    assert_eq!(core.context().get::<f64>(FPS_KEY), Some(&50.0));
}

#[test]
fn fixed_update_accumulates_play_time() {
    let mut core = started(100.0);
    assert_eq!(core.context().get::<f64>(TIME_KEY), Some(&0.0));
    core.tick(250.0);
    core.tick(500.0);
    assert_eq!(core.context().get::<f64>(TIME_KEY), Some(&0.5));
}

#[test]
fn paused_game_keeps_play_time() {
    let mut core = started(100.0);
    core.tick(100.0);
    core.pause();
    core.tick(600.0);
    assert_eq!(core.context().get::<f64>(TIME_KEY), Some(&0.1));
}

#[test]
fn player_walks_while_key_held() {
    let mut core = started(200.0);
    core.key_down(&Key::from("ArrowLeft"));
    core.tick(100.0);
    assert_eq!(player_location(&core), Vector2D::new(82.0, 100.0));

    core.key_up(&Key::from("ArrowLeft"));
    core.tick(200.0);
    assert_eq!(player_location(&core), Vector2D::new(82.0, 100.0));
}

#[test]
fn walking_advances_the_sheet() {
    let mut core = started(200.0);
    core.key_down(&Key::from("ArrowDown"));
    core.tick(130.0);

    let blits = core.surface().blits.borrow();
    let (_, crop, _) = blits.iter().find(|(source, ..)| source == PLAYER_SHEET).expect("player drawn");
    assert_eq!(crop.map(|c| c.location), Some(Vector2D::new(32.0, 0.0)));
}

#[test]
fn render_clears_before_drawing() {
    let mut core = started(100.0);
    core.tick(16.0);
    assert_eq!(*core.surface().clears.borrow(), 1);
    let sources: Vec<String> = core.surface().blits.borrow().iter().map(|(s, ..)| s.clone()).collect();
    assert_eq!(sources, vec![PLAYER_SHEET.to_owned(), COIN_IMAGE.to_owned()]);
}

#[test]
fn touching_a_coin_scores_and_respawns_it() {
    let mut core = started(100.0);
    core.key_down(&Key::from("ArrowRight"));
    core.tick(50.0);

    assert_eq!(core.context().get::<u32>(SCORE_KEY), Some(&1));
    assert!(!core.entities().contains("coin-0"));
    let next = core.entities().get("coin-1").map(|c| c.location());
    assert_eq!(next, Some(coin_spot(1, 100.0, 100.0)));
}

#[test]
fn escape_ends_the_game() {
    let mut core = started(100.0);
    core.key_down(&Key::from("Escape"));
    assert_eq!(core.tick(16.0), TickOutcome::Continue);
    assert!(!core.is_running());
    assert_eq!(core.tick(32.0), TickOutcome::Stop);
}
