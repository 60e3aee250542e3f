//! The runaway "No" button
//!
//! Keeps the evasive button just out of reach of the pointer: when the
//! pointer gets close, the button jumps to the farthest of a handful of random
//! spots, shrinking a little each time while the "Yes" button grows.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Layout;
use crate::consts::INITIAL_POSITION;
use crate::settings::EvasionConfig;

/// Scale multipliers of the two buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePair {
    /// The button that runs away
    pub evasive: f32,
    /// The accepting button
    pub alternative: f32,
}

impl Default for ScalePair {
    fn default() -> Self {
        Self {
            evasive: 1.0,
            alternative: 1.0,
        }
    }
}

/// Evasion controller state
#[derive(Debug, Clone)]
pub struct Evader {
    config: EvasionConfig,
    rng: Pcg32,
    active: bool,
    /// Top-left corner of the button within the playground
    position: Vec2,
    scales: ScalePair,
    last_pointer: Vec2,
    last_relocation_ms: Option<f64>,
    relocations: u32,
}

impl Evader {
    /// Create a started evader
    pub fn new(config: EvasionConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            active: true,
            position: Vec2::new(INITIAL_POSITION.0, INITIAL_POSITION.1),
            scales: ScalePair::default(),
            last_pointer: Vec2::ZERO,
            last_relocation_ms: None,
            relocations: 0,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scales(&self) -> ScalePair {
        self.scales
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    /// Successful relocations so far
    pub fn relocations(&self) -> u32 {
        self.relocations
    }

    /// Current proximity radius; shrinks with the button, floored
    pub fn threshold(&self) -> f32 {
        self.config.base_radius * self.config.min_scale_factor.max(self.scales.evasive)
    }

    /// Pointer moved inside the playground. Returns true if the button jumped.
    pub fn on_pointer_move(&mut self, pointer: Vec2, layout: Option<Layout>, now_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        let Some(layout) = layout else {
            return false;
        };
        self.last_pointer = pointer;

        let dist = pointer.distance(layout.element.center());
        let throttled = self
            .last_relocation_ms
            .is_some_and(|last| now_ms - last < self.config.min_interval_ms);

        if dist < self.threshold() && !throttled {
            self.last_relocation_ms = Some(now_ms);
            return self.relocate(Some(layout)).is_some();
        }
        false
    }

    /// Pointer entered the button itself
    pub fn on_pointer_enter(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        self.relocate(layout)
    }

    /// Button received keyboard focus
    pub fn on_focus(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        self.relocate(layout)
    }

    /// Jump to the farthest of N random spots and update the scales
    pub fn relocate(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let layout = layout?;

        let candidates =
            sample_candidates(&mut self.rng, layout.movable_area(), self.config.candidates);
        let best = farthest_from(&candidates, self.last_pointer)?;

        self.position = best;
        self.scales.evasive = (self.scales.evasive * self.config.shrink_factor).max(self.config.min_scale);
        self.scales.alternative =
            (self.scales.alternative * self.config.grow_factor).min(self.config.max_scale);
        self.relocations += 1;

        log::debug!(
            "Relocated to ({:.0}, {:.0}), scales {:.3}/{:.3}",
            best.x,
            best.y,
            self.scales.evasive,
            self.scales.alternative
        );
        Some(best)
    }

    /// Deterministic placement on first layout and on resize: right-aligned,
    /// vertically centered
    pub fn place_initial(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let layout = layout?;
        let (container, element) = (layout.container, layout.element);
        self.position = Vec2::new(
            (container.w - element.w - self.config.initial_margin).max(0.0),
            ((container.h - element.h) / 2.0).max(0.0),
        );
        Some(self.position)
    }
}

/// Uniform random top-left corners within the movable area
pub fn sample_candidates(rng: &mut Pcg32, area: Vec2, count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|_| Vec2::new(rng.random::<f32>() * area.x, rng.random::<f32>() * area.y))
        .collect()
}

/// Candidate with the greatest distance to `from` (first wins ties)
pub fn farthest_from(candidates: &[Vec2], from: Vec2) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for &c in candidates {
        let d = c.distance(from);
        match best {
            Some((_, best_d)) if d <= best_d => {}
            _ => best = Some((c, d)),
        }
    }
    best.map(|(c, _)| c)
}
