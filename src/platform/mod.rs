//! Platform abstraction layer
//!
//! Browser glue kept out of `sim`:
//! - Measuring the playground and the evasive button
//! - Writing button positions/scales back to the DOM
//! - Animation frames via `requestAnimationFrame`

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use frame::RafScheduler;

use glam::Vec2;

/// CSS for a button placed at `pos` (playground coordinates) and scaled
pub fn button_style(pos: Option<Vec2>, scale: f32) -> Vec<(&'static str, String)> {
    let mut props = Vec::with_capacity(3);
    if let Some(pos) = pos {
        props.push(("left", format!("{:.1}px", pos.x)));
        props.push(("top", format!("{:.1}px", pos.y)));
    }
    props.push(("transform", format!("scale({:.4})", scale)));
    props
}
