//! The drawing contract the loop and sprites render through.
//!
//! A [`Surface`] is a fixed-size 2D raster that can clear rectangles and blit
//! images identified by their source path. The browser implementation lives in
//! [`crate::canvas`]; tests use a recording double.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::EngineError;
use crate::geometry::{Dimensions2D, Rect, Vector2D};

/// A 2D raster surface.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> f64;

    /// Height in pixels.
    fn height(&self) -> f64;

    /// Clear a rectangular region.
    fn clear_rect(&self, rect: Rect);

    /// Blit the image at `source` into `dest`, optionally cropping the source first.
    ///
    /// # Errors
    ///
    /// Returns an error if the image handle cannot be created or the blit fails.
    fn draw_image(&self, source: &str, crop: Option<Rect>, dest: Rect) -> Result<(), EngineError>;

    /// The full surface as a rectangle anchored at the origin.
    fn bounds(&self) -> Rect {
        Rect::new(Vector2D::default(), Dimensions2D::new(self.width(), self.height()))
    }
}

/// Clear the whole surface. Does nothing when no surface is available.
pub fn clear_canvas<S: Surface + ?Sized>(surface: Option<&S>) {
    let Some(surface) = surface else {
        return;
    };
    surface.clear_rect(surface.bounds());
}

/// Image handles keyed by source path.
///
/// A handle is created the first time its path is requested and reused on
/// every later draw.
pub struct ImageCache<H> {
    handles: HashMap<String, H>,
}

impl<H> ImageCache<H> {
    #[must_use]
    pub fn new() -> Self {
        Self { handles: HashMap::new() }
    }

    /// Return the handle for `source`, creating it with `load` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the error from `load`; nothing is cached in that case.
    pub fn get_or_load<F>(&mut self, source: &str, load: F) -> Result<&H, EngineError>
    where
        F: FnOnce(&str) -> Result<H, EngineError>,
    {
        match self.handles.entry(source.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(load(source)?)),
        }
    }

    /// Drop the handle for `source`, if cached.
    pub fn evict(&mut self, source: &str) -> Option<H> {
        self.handles.remove(source)
    }

    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.handles.contains_key(source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H> Default for ImageCache<H> {
    fn default() -> Self {
        Self::new()
    }
}
