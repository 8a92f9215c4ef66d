//! The demo game: a player moved with the arrow keys collects coins.
//!
//! Entity locations are world coordinates: the center of the sprite, with Y
//! growing upward from the bottom of the canvas. Everything here is generic
//! over the [`Surface`], so the game runs natively under test.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use jetpack::collision::is_entity_colliding_with_entity;
use jetpack::entity::{Entity, HookResult, Spatial};
use jetpack::game_loop::Callbacks;
use jetpack::geometry::{BoundingBox, Dimensions2D, Vector2D};
use jetpack::input::PressedKeys;
use jetpack::sprite::{SheetLayout, Sprite, SpriteSheet};
use jetpack::surface::Surface;
use jetpack::toolbox::{FrameToolbox, InputToolbox};

pub const PLAYER_ID: &str = "player";
pub const PLAYER_SHEET: &str = "assets/player.png";
pub const COIN_IMAGE: &str = "assets/coin.png";

/// Context key: `u32` coins collected so far.
pub const SCORE_KEY: &str = "score";
/// Context key: `f64` frame rate of the last tick.
pub const FPS_KEY: &str = "fps";
/// Context key: `f64` seconds of play, summed in the fixed-update phase.
pub const TIME_KEY: &str = "time";
/// Context key: [`Hitbox`] of the player as of the last update.
pub const PLAYER_BOX_KEY: &str = "player_box";

/// Player speed in pixels per second.
pub const PLAYER_SPEED: f64 = 180.0;
/// Seconds each walk frame stays on screen.
pub const FRAME_SECONDS: f64 = 0.12;

const PLAYER_SIZE: f64 = 32.0;
const PLAYER_FRAMES: usize = 4;
const COIN_SIZE: f64 = 16.0;

/// Fractions of the playfield where successive coins appear.
const COIN_SPOTS: [(f64, f64); 5] = [(0.8, 0.5), (0.2, 0.8), (0.5, 0.2), (0.85, 0.85), (0.15, 0.2)];

/// Direction of travel for the held arrow keys, one unit per axis.
#[must_use]
pub fn direction(keys: &PressedKeys) -> Vector2D {
    let axis = |neg: &str, pos: &str| match (keys.is_pressed(neg), keys.is_pressed(pos)) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    Vector2D::new(axis("ArrowLeft", "ArrowRight"), axis("ArrowDown", "ArrowUp"))
}

/// Keep a center-based box of `dimensions` inside a `width` × `height` field.
#[must_use]
pub fn clamp_to_field(location: Vector2D, dimensions: Dimensions2D, width: f64, height: f64) -> Vector2D {
    let half_w = dimensions.width / 2.0;
    let half_h = dimensions.height / 2.0;
    Vector2D::new(
        location.x.clamp(half_w, (width - half_w).max(half_w)),
        location.y.clamp(half_h, (height - half_h).max(half_h)),
    )
}

/// Where the `n`th coin appears on a `width` × `height` field.
#[must_use]
pub fn coin_spot(n: usize, width: f64, height: f64) -> Vector2D {
    let (fx, fy) = COIN_SPOTS[n % COIN_SPOTS.len()];
    Vector2D::new(fx * width, fy * height)
}

/// Center-based location to a corner-based bounding box.
fn centered_box(location: Vector2D, dimensions: Dimensions2D) -> BoundingBox {
    BoundingBox::new(
        Vector2D::new(location.x - dimensions.width / 2.0, location.y - dimensions.height / 2.0),
        dimensions,
    )
}

/// A snapshot of an entity's box, shared through the game context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub location: Vector2D,
    pub dimensions: Dimensions2D,
}

impl Spatial for Hitbox {
    fn id(&self) -> &str {
        PLAYER_ID
    }

    fn location(&self) -> Vector2D {
        self.location
    }

    fn dimensions(&self) -> Dimensions2D {
        self.dimensions
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(centered_box(self.location, self.dimensions))
    }
}

// =============================================================
// Player
// =============================================================

pub struct Player {
    location: Vector2D,
    velocity: Vector2D,
    sheet: SpriteSheet,
    frame_timer: f64,
}

impl Player {
    #[must_use]
    pub fn new(location: Vector2D) -> Self {
        let size = Dimensions2D::new(PLAYER_SIZE, PLAYER_SIZE);
        let sheet = SpriteSheet::new(PLAYER_SHEET, location, size, SheetLayout::grid(PLAYER_FRAMES, 1, size));
        Self { location, velocity: Vector2D::default(), sheet, frame_timer: 0.0 }
    }

    #[must_use]
    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    #[must_use]
    pub fn frame(&self) -> usize {
        self.sheet.frame
    }

    fn hitbox(&self) -> Hitbox {
        Hitbox { location: self.location, dimensions: self.dimensions() }
    }

    fn animate(&mut self, elapsed: f64) {
        if self.velocity == Vector2D::default() {
            self.sheet.frame = 0;
            self.frame_timer = 0.0;
            return;
        }
        self.frame_timer += elapsed;
        while self.frame_timer >= FRAME_SECONDS {
            self.frame_timer -= FRAME_SECONDS;
            self.sheet.advance();
        }
    }
}

impl Spatial for Player {
    fn id(&self) -> &str {
        PLAYER_ID
    }

    fn location(&self) -> Vector2D {
        self.location
    }

    fn dimensions(&self) -> Dimensions2D {
        self.sheet.dimensions
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(centered_box(self.location, self.dimensions()))
    }
}

impl<S: Surface> Entity<S> for Player {
    fn init(&mut self) {
        log::debug!("player ready at ({:.0}, {:.0})", self.location.x, self.location.y);
    }

    fn handle_input(&mut self, toolbox: &mut InputToolbox<'_, S>) -> HookResult {
        let dir = direction(toolbox.keys());
        self.velocity = Vector2D::new(dir.x * PLAYER_SPEED, dir.y * PLAYER_SPEED);
        Ok(())
    }

    fn update(&mut self, toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        let dt = toolbox.elapsed_seconds();
        let moved = Vector2D::new(self.location.x + self.velocity.x * dt, self.location.y + self.velocity.y * dt);
        let (width, height) = (toolbox.surface().width(), toolbox.surface().height());
        self.location = clamp_to_field(moved, self.dimensions(), width, height);
        self.animate(dt);
        let hitbox = self.hitbox();
        toolbox.context_mut().set(PLAYER_BOX_KEY, hitbox);
        Ok(())
    }

    fn render(&mut self, toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        if !self.visible() {
            return Ok(());
        }
        self.sheet.location = toolbox.canvas_rect(self.location, self.dimensions())?.location;
        self.sheet.draw(toolbox.surface())
    }
}

// =============================================================
// Coin
// =============================================================

pub struct Coin {
    id: String,
    serial: usize,
    location: Vector2D,
    sprite: Sprite,
}

impl Coin {
    #[must_use]
    pub fn new(serial: usize, location: Vector2D) -> Self {
        let size = Dimensions2D::new(COIN_SIZE, COIN_SIZE);
        Self { id: format!("coin-{serial}"), serial, location, sprite: Sprite::new(COIN_IMAGE, location, size) }
    }
}

impl Spatial for Coin {
    fn id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Vector2D {
        self.location
    }

    fn dimensions(&self) -> Dimensions2D {
        self.sprite.dimensions
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(centered_box(self.location, self.dimensions()))
    }
}

impl<S: Surface + 'static> Entity<S> for Coin {
    fn fixed_update(&mut self, toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        let Some(player) = toolbox.context().get::<Hitbox>(PLAYER_BOX_KEY).copied() else {
            return Ok(());
        };
        if !is_entity_colliding_with_entity(&*self, &player) {
            return Ok(());
        }

        let context = toolbox.context_mut();
        let score = context.get::<u32>(SCORE_KEY).copied().unwrap_or(0) + 1;
        context.set(SCORE_KEY, score);
        log::info!("{} collected, score {score}", self.id);

        let next = self.serial + 1;
        let spot = coin_spot(next, toolbox.surface().width(), toolbox.surface().height());
        toolbox.commands().despawn(self.id.clone());
        toolbox.commands().spawn(Coin::new(next, spot));
        Ok(())
    }

    fn render(&mut self, toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        self.sprite.location = toolbox.canvas_rect(self.location, self.dimensions())?.location;
        self.sprite.draw(toolbox.surface())
    }
}

// =============================================================
// Game-level callbacks
// =============================================================

/// The demo's callbacks. Each phase the game's entities use needs one here,
/// or the loop skips that phase for them too.
#[must_use]
pub fn callbacks<S: Surface + 'static>() -> Callbacks<S> {
    Callbacks::new()
        .on_init(|toolbox| {
            toolbox.context_mut().set(SCORE_KEY, 0_u32);
            toolbox.context_mut().set(FPS_KEY, 0.0_f64);
            toolbox.context_mut().set(TIME_KEY, 0.0_f64);
            Ok(())
        })
        .on_handle_input(|toolbox| {
            if toolbox.keys().is_pressed("Escape") {
                log::info!("escape pressed, ending game");
                toolbox.commands().end();
            }
            Ok(())
        })
        .on_update(|toolbox| {
            let fps = toolbox.fps();
            toolbox.context_mut().set(FPS_KEY, fps);
            Ok(())
        })
        .on_fixed_update(|toolbox| {
            let played = toolbox.context().get::<f64>(TIME_KEY).copied().unwrap_or(0.0) + toolbox.elapsed_seconds();
            toolbox.context_mut().set(TIME_KEY, played);
            Ok(())
        })
        .on_render(|toolbox| {
            toolbox.clear();
            Ok(())
        })
}

/// Register the player at the middle of the field and the first coin.
///
/// # Errors
///
/// Returns [`jetpack::EngineError::DuplicateEntity`] if either id is taken.
pub fn spawn_initial<S: Surface + 'static>(
    entities: &mut jetpack::entity::Entities<S>,
    width: f64,
    height: f64,
) -> Result<(), jetpack::EngineError> {
    entities.insert(Player::new(Vector2D::new(width / 2.0, height / 2.0)))?;
    entities.insert(Coin::new(0, coin_spot(0, width, height)))?;
    Ok(())
}
