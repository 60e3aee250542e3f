//! Fireworks overlay rendering
//!
//! The simulation is read, never written: each frame the renderer turns the
//! live particle set into filled circles on a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Color, Particle};

/// Canvas backing store size for a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackingSize {
    /// Device pixels
    pub width: u32,
    pub height: u32,
    /// Scale from logical to device pixels
    pub dpr: f64,
}

impl BackingSize {
    /// Size a logical viewport for the given device pixel ratio (never below 1)
    pub fn for_viewport(logical_w: f64, logical_h: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
        Self {
            width: (logical_w.max(0.0) * dpr).floor() as u32,
            height: (logical_h.max(0.0) * dpr).floor() as u32,
            dpr,
        }
    }
}

/// One circle to draw, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
    pub color: Color,
}

impl From<&Particle> for Sprite {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x as f64,
            y: p.pos.y as f64,
            radius: p.radius as f64,
            alpha: p.alpha() as f64,
            color: p.color,
        }
    }
}

/// Draw list for the current frame
pub fn sprites(particles: &[Particle]) -> impl Iterator<Item = Sprite> + '_ {
    particles.iter().map(Sprite::from)
}
