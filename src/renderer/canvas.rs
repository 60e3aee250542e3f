//! Canvas 2D backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BackingSize, sprites};
use crate::sim::{Color, Particle};

/// Owns the fireworks canvas while the show is running
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Viewport in logical pixels (what the simulation uses)
    logical: (f64, f64),
    /// CSS strings for colors seen so far
    css_cache: Vec<(Color, String)>,
}

impl CanvasRenderer {
    /// Grab a 2D context from the canvas. `None` if the browser refuses.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            logical: (0.0, 0.0),
            css_cache: Vec::new(),
        })
    }

    /// Match the backing store to the viewport in device pixels, keeping
    /// drawing coordinates in logical pixels
    pub fn resize(&mut self, logical_w: f64, logical_h: f64, dpr: f64) {
        let size = BackingSize::for_viewport(logical_w, logical_h, dpr);
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let style = self.canvas.style();
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("height", "100%");
        // Resizing resets the context state
        let _ = self.ctx.set_transform(size.dpr, 0.0, 0.0, size.dpr, 0.0, 0.0);
        self.logical = (logical_w, logical_h);
        log::debug!("Canvas resized to {}x{} (dpr {})", size.width, size.height, size.dpr);
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.logical.0, self.logical.1);
    }

    /// Clear and draw every live particle with additive blending
    pub fn draw(&mut self, particles: &[Particle]) {
        self.clear();
        let _ = self.ctx.set_global_composite_operation("lighter");

        for sprite in sprites(particles) {
            let idx = self.css_index(sprite.color);
            let css = &self.css_cache[idx].1;
            self.ctx.begin_path();
            self.ctx.set_global_alpha(sprite.alpha);
            self.ctx.set_fill_style_str(css);
            let _ = self
                .ctx
                .arc(sprite.x, sprite.y, sprite.radius, 0.0, std::f64::consts::TAU);
            self.ctx.fill();
        }

        self.ctx.set_global_alpha(1.0);
    }

    fn css_index(&mut self, color: Color) -> usize {
        if let Some(idx) = self.css_cache.iter().position(|(c, _)| *c == color) {
            return idx;
        }
        self.css_cache.push((color, color.to_css()));
        self.css_cache.len() - 1
    }
}
