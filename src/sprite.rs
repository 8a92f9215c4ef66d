//! Sprites and sprite sheets.
//!
//! A [`Sprite`] blits a whole image. A [`SpriteSheet`] blits one cell of a
//! grid image, selected by its current `frame`. Both draw through a
//! [`Surface`], which caches image handles by source path, so switching a
//! sprite's `source` simply selects another cached handle.

#[cfg(test)]
#[path = "sprite_test.rs"]
mod sprite_test;

use crate::error::EngineError;
use crate::geometry::{Dimensions2D, Rect, Vector2D};
use crate::surface::Surface;

/// Source offsets, one per animation frame.
pub type SpriteMap = Vec<Vector2D>;

/// A single image drawn at a location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sprite {
    pub source: String,
    pub location: Vector2D,
    pub dimensions: Dimensions2D,
}

impl Sprite {
    #[must_use]
    pub fn new(source: impl Into<String>, location: Vector2D, dimensions: Dimensions2D) -> Self {
        Self { source: source.into(), location, dimensions }
    }

    /// Destination rectangle on the surface.
    #[must_use]
    pub fn dest(&self) -> Rect {
        Rect::new(self.location, self.dimensions)
    }

    /// Blit the image at `location` scaled to `dimensions`.
    ///
    /// # Errors
    ///
    /// Propagates [`Surface::draw_image`] errors.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &S) -> Result<(), EngineError> {
        surface.draw_image(&self.source, None, self.dest())
    }
}

/// Grid description used to generate a sheet's sprite map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetLayout {
    pub columns: usize,
    pub rows: usize,
    pub sprite_dimensions: Dimensions2D,
    /// Pixels between neighbouring cells, both horizontally and vertically.
    pub gap: f64,
    /// Explicit offsets. When non-empty they are used as-is and the grid
    /// fields are ignored.
    pub sprite_map: Option<SpriteMap>,
}

impl SheetLayout {
    /// A gapless grid of `columns` × `rows` cells of `sprite_dimensions`.
    #[must_use]
    pub fn grid(columns: usize, rows: usize, sprite_dimensions: Dimensions2D) -> Self {
        Self { columns, rows, sprite_dimensions, gap: 0.0, sprite_map: None }
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Use explicit offsets instead of a generated grid.
    #[must_use]
    pub fn with_sprite_map(mut self, sprite_map: SpriteMap) -> Self {
        self.sprite_map = Some(sprite_map);
        self
    }
}

/// Row-major cell offsets: left to right, then top to bottom.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_sprite_map(layout: &SheetLayout) -> SpriteMap {
    let step_x = layout.sprite_dimensions.width + layout.gap;
    let step_y = layout.sprite_dimensions.height + layout.gap;
    let mut map = Vec::with_capacity(layout.columns * layout.rows);
    for row in 0..layout.rows {
        for col in 0..layout.columns {
            map.push(Vector2D::new(col as f64 * step_x, row as f64 * step_y));
        }
    }
    map
}

/// One cell of a grid image, picked by `frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub source: String,
    pub location: Vector2D,
    pub dimensions: Dimensions2D,
    /// Index into the sprite map of the cell drawn next.
    pub frame: usize,
    sprite_map: SpriteMap,
}

impl SpriteSheet {
    /// Build a sheet, generating its sprite map from `layout` unless the
    /// layout supplies a non-empty one.
    #[must_use]
    pub fn new(source: impl Into<String>, location: Vector2D, dimensions: Dimensions2D, layout: SheetLayout) -> Self {
        let sprite_map = match layout.sprite_map {
            Some(ref map) if !map.is_empty() => map.clone(),
            _ => generate_sprite_map(&layout),
        };
        Self { source: source.into(), location, dimensions, frame: 0, sprite_map }
    }

    #[must_use]
    pub fn sprite_map(&self) -> &[Vector2D] {
        &self.sprite_map
    }

    /// Number of frames in the sheet.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.sprite_map.len()
    }

    /// Step to the next frame, wrapping to 0 after the last.
    pub fn advance(&mut self) {
        if self.sprite_map.is_empty() {
            return;
        }
        self.frame = (self.frame + 1) % self.sprite_map.len();
    }

    /// Source crop for the current frame. The cell is `dimensions` wide and
    /// high, starting at the frame's offset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FrameOutOfRange`] if `frame` has no offset.
    pub fn crop(&self) -> Result<Rect, EngineError> {
        let offset = self
            .sprite_map
            .get(self.frame)
            .copied()
            .ok_or(EngineError::FrameOutOfRange { frame: self.frame, frames: self.sprite_map.len() })?;
        Ok(Rect::new(offset, self.dimensions))
    }

    /// Blit the current frame at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FrameOutOfRange`] for a frame outside the map
    /// (nothing is drawn), or propagates [`Surface::draw_image`] errors.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &S) -> Result<(), EngineError> {
        let crop = self.crop()?;
        surface.draw_image(&self.source, Some(crop), Rect::new(self.location, self.dimensions))
    }
}
