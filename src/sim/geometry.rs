//! Layout geometry shared by the evader and the fireworks
//!
//! All coordinates are logical (CSS) pixels. Device pixel ratio only matters
//! to the renderer.

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size at the origin
    pub fn sized(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// True when the rectangle has been laid out (finite, non-negative size)
    pub fn is_measurable(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
            && self.w >= 0.0
            && self.h >= 0.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

/// Measurement of the playground and the evasive button inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Playground size (origin is always 0,0)
    pub container: Rect,
    /// Rendered (already scaled) button bounds in container coordinates
    pub element: Rect,
}

impl Layout {
    /// Build a layout, rejecting unmeasurable boxes
    pub fn new(container: Rect, element: Rect) -> Option<Self> {
        (container.is_measurable() && element.is_measurable())
            .then_some(Self { container, element })
    }

    /// Room left for the button's top-left corner
    pub fn movable_area(&self) -> Vec2 {
        (self.container.size() - self.element.size()).max(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 10.0);
        assert_eq!(r.center(), Vec2::new(30.0, 25.0));
    }

    #[test]
    fn test_movable_area_never_negative() {
        let layout = Layout::new(Rect::sized(50.0, 30.0), Rect::new(0.0, 0.0, 80.0, 20.0)).unwrap();
        assert_eq!(layout.movable_area(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_unmeasurable_layout_rejected() {
        assert!(Layout::new(Rect::sized(f32::NAN, 10.0), Rect::sized(1.0, 1.0)).is_none());
        assert!(Layout::new(Rect::sized(10.0, 10.0), Rect::sized(-1.0, 1.0)).is_none());
        assert!(Layout::new(Rect::sized(10.0, 10.0), Rect::sized(1.0, 1.0)).is_some());
    }

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(10.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
    }
}
