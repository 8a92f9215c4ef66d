//! Recording [`Surface`] double shared by the unit tests.

use std::cell::RefCell;

use crate::error::EngineError;
use crate::geometry::Rect;
use crate::surface::{ImageCache, Surface};

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Image { source: String, crop: Option<Rect>, dest: Rect },
}

/// Surface that remembers every call instead of drawing.
pub struct RecordingSurface {
    width: f64,
    height: f64,
    calls: RefCell<Vec<DrawCall>>,
    images: RefCell<ImageCache<usize>>,
    loads: RefCell<usize>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: RefCell::new(Vec::new()),
            images: RefCell::new(ImageCache::new()),
            loads: RefCell::new(0),
        }
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    /// How many image handles have been created.
    pub fn image_loads(&self) -> usize {
        *self.loads.borrow()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&self, rect: Rect) {
        self.calls.borrow_mut().push(DrawCall::Clear(rect));
    }

    fn draw_image(&self, source: &str, crop: Option<Rect>, dest: Rect) -> Result<(), EngineError> {
        let mut images = self.images.borrow_mut();
        images.get_or_load(source, |_| {
            let mut loads = self.loads.borrow_mut();
            *loads += 1;
            Ok(*loads)
        })?;
        self.calls
            .borrow_mut()
            .push(DrawCall::Image { source: source.to_owned(), crop, dest });
        Ok(())
    }
}
