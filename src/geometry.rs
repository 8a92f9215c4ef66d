//! Plain geometry: points, sizes, rectangles, bounding boxes.
//!
//! Game code works in a semantic space where an entity's location is its
//! center and Y grows upward. The canvas is top-left based with Y growing
//! downward; [`canvas_location`] converts between the two.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::error::EngineError;
use crate::surface::Surface;

/// A point or offset in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions2D {
    pub width: f64,
    pub height: f64,
}

impl Dimensions2D {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left anchored rectangle, used for draw destinations and source crops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub location: Vector2D,
    pub dimensions: Dimensions2D,
}

impl Rect {
    #[must_use]
    pub fn new(location: Vector2D, dimensions: Dimensions2D) -> Self {
        Self { location, dimensions }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.location.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.location.x + self.dimensions.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.location.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.location.y + self.dimensions.height
    }
}

/// Axis-aligned box used for overlap testing.
///
/// `center` and `radius` are computed from the current location and
/// dimensions on every call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub location: Vector2D,
    pub dimensions: Dimensions2D,
}

impl BoundingBox {
    #[must_use]
    pub fn new(location: Vector2D, dimensions: Dimensions2D) -> Self {
        Self { location, dimensions }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vector2D {
        Vector2D {
            x: self.location.x + self.dimensions.width / 2.0,
            y: self.location.y + self.dimensions.height / 2.0,
        }
    }

    /// Half of the diagonal.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.dimensions.width.hypot(self.dimensions.height) / 2.0
    }

    /// The box as a drawable rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.location, self.dimensions)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Vector2D, b: Vector2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Convert a center-based, Y-up entity location into the top-left corner of
/// its Y-down canvas rectangle.
///
/// # Errors
///
/// Returns [`EngineError::MissingCanvas`] when `surface` is `None`.
pub fn canvas_location<S: Surface + ?Sized>(
    location: Vector2D,
    dimensions: Dimensions2D,
    surface: Option<&S>,
) -> Result<Vector2D, EngineError> {
    let Some(surface) = surface else {
        return Err(EngineError::MissingCanvas);
    };
    Ok(Vector2D {
        x: location.x - dimensions.width / 2.0,
        y: surface.height() - location.y - dimensions.height / 2.0,
    })
}

/// [`canvas_location`] as a full rectangle, ready to hand to [`Surface::draw_image`].
///
/// # Errors
///
/// Returns [`EngineError::MissingCanvas`] when `surface` is `None`.
pub fn canvas_rect<S: Surface + ?Sized>(
    location: Vector2D,
    dimensions: Dimensions2D,
    surface: Option<&S>,
) -> Result<Rect, EngineError> {
    Ok(Rect::new(canvas_location(location, dimensions, surface)?, dimensions))
}
