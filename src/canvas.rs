//! Browser drawing surface.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`] on behalf of the engine. Game code
//! that needs more than blitting (paths, text, fills) reaches the context
//! through [`CanvasSurface::context`].
//!
//! All fallible Canvas2D calls propagate errors as [`EngineError::Js`].

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::CONTEXT_2D;
use crate::error::EngineError;
use crate::geometry::Rect;
use crate::surface::{ImageCache, Surface};

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: RefCell<ImageCache<HtmlImageElement>>,
}

impl CanvasSurface {
    /// Bind to `canvas`, deriving its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ContextUnavailable`] if the canvas has no 2D
    /// context to give (for example because another context type was already
    /// requested on it).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context(CONTEXT_2D)?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        Ok(Self { canvas, ctx, images: RefCell::new(ImageCache::new()) })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Forget the cached image for `source` so the next draw reloads it.
    pub fn evict_image(&self, source: &str) {
        self.images.borrow_mut().evict(source);
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn clear_rect(&self, rect: Rect) {
        self.ctx
            .clear_rect(rect.location.x, rect.location.y, rect.dimensions.width, rect.dimensions.height);
    }

    fn draw_image(&self, source: &str, crop: Option<Rect>, dest: Rect) -> Result<(), EngineError> {
        let mut images = self.images.borrow_mut();
        let image = images.get_or_load(source, load_image)?;

        match crop {
            Some(src) => self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    src.location.x,
                    src.location.y,
                    src.dimensions.width,
                    src.dimensions.height,
                    dest.location.x,
                    dest.location.y,
                    dest.dimensions.width,
                    dest.dimensions.height,
                )?,
            None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                dest.location.x,
                dest.location.y,
                dest.dimensions.width,
                dest.dimensions.height,
            )?,
        }
        Ok(())
    }
}

fn load_image(source: &str) -> Result<HtmlImageElement, EngineError> {
    let image = HtmlImageElement::new()?;
    image.set_src(source);
    log::debug!("image handle created for {source}");
    Ok(image)
}
