//! Fireworks celebration
//!
//! Timed radial bursts of particles under a little gravity and drag. Bursts
//! spawn for a fixed duration; afterwards the remaining particles are left to
//! fade out before the engine goes idle.
//!
//! Motion is per frame, not per second: one `step` is one display refresh.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::FireworksConfig;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to draw, no frames wanted
    Idle,
    /// Spawning bursts and simulating
    Running,
    /// Duration elapsed, letting live particles fade
    Draining,
}

/// What the frame loop should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame
    Continue,
    /// Engine went idle: clear the canvas, stop scheduling
    Finished,
}

/// 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    /// CSS hex notation, e.g. `#ff4d6d`
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// A single spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, removed once it reaches 0
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
    pub radius: f32,
    pub color: Color,
}

impl Particle {
    /// Draw opacity
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Advance one frame. Returns false once expired.
    pub fn step(&mut self, gravity: f32, drag: f32) -> bool {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.vel *= drag;
        self.life -= self.decay;
        self.life > 0.0
    }
}

/// Particle burst engine
#[derive(Debug, Clone)]
pub struct Fireworks {
    config: FireworksConfig,
    rng: Pcg32,
    phase: Phase,
    particles: Vec<Particle>,
    /// Logical viewport size used for burst origins
    viewport: Vec2,
    duration_ms: f64,
    /// Frame timestamp of the first step after activation
    start_ms: Option<f64>,
    last_burst_ms: Option<f64>,
    bursts: u32,
}

impl Fireworks {
    pub fn new(config: FireworksConfig, seed: u64) -> Self {
        let duration_ms = config.duration_ms;
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Idle,
            particles: Vec::new(),
            viewport: Vec2::ZERO,
            duration_ms,
            start_ms: None,
            last_burst_ms: None,
            bursts: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Live particles, in spawn order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Bursts spawned since the last activation
    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    /// Start (or restart) the show. The clock starts on the next `step`.
    pub fn activate(&mut self, duration_ms: f64) {
        self.reset();
        self.duration_ms = duration_ms.max(0.0);
        self.phase = Phase::Running;
        log::info!("Fireworks activated for {:.0}ms", self.duration_ms);
    }

    /// Stop immediately and drop every particle
    pub fn deactivate(&mut self) {
        if self.phase != Phase::Idle {
            log::info!("Fireworks deactivated ({} particles dropped)", self.particles.len());
        }
        self.reset();
    }

    /// Viewport changed (logical pixels)
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ZERO);
    }

    /// Advance one frame at frame clock `now_ms`
    pub fn step(&mut self, now_ms: f64) -> FrameStatus {
        if self.phase == Phase::Idle {
            return FrameStatus::Finished;
        }

        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = now_ms - start;
        let spawning = elapsed < self.duration_ms;

        let burst_due = self
            .last_burst_ms
            .is_none_or(|last| now_ms - last >= self.config.burst_interval_ms);
        if spawning && burst_due {
            self.last_burst_ms = Some(now_ms);
            let origin = self.random_origin();
            self.spawn_burst(origin);
        }

        let (gravity, drag) = (self.config.gravity, self.config.drag);
        self.particles.retain_mut(|p| p.step(gravity, drag));

        if spawning {
            self.phase = Phase::Running;
            FrameStatus::Continue
        } else if !self.particles.is_empty() {
            self.phase = Phase::Draining;
            FrameStatus::Continue
        } else {
            log::info!("Fireworks finished after {} bursts", self.bursts);
            self.reset();
            FrameStatus::Finished
        }
    }

    /// Push one burst of particles at `origin`
    pub fn spawn_burst(&mut self, origin: Vec2) {
        let c = &self.config;
        self.particles.reserve(c.burst_size);
        for _ in 0..c.burst_size {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = c.speed_min + self.rng.random::<f32>() * c.speed_span;
            let decay = c.decay_min + self.rng.random::<f32>() * c.decay_span;
            let radius = c.radius_min + self.rng.random::<f32>() * c.radius_span;
            let color = if c.palette.is_empty() {
                Color(0xffffff)
            } else {
                Color(c.palette[self.rng.random_range(0..c.palette.len())])
            };
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                decay,
                radius,
                color,
            });
        }
        self.bursts += 1;
    }

    /// Burst origin, biased toward the upper middle of the viewport
    fn random_origin(&mut self) -> Vec2 {
        let margin = self.config.burst_margin;
        let span_x = (self.viewport.x - 2.0 * margin).max(0.0);
        let span_y = self.viewport.y * self.config.burst_height_fraction;
        Vec2::new(
            margin + self.rng.random::<f32>() * span_x,
            margin + self.rng.random::<f32>() * span_y,
        )
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.particles.clear();
        self.start_ms = None;
        self.last_burst_ms = None;
        self.bursts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn engine(seed: u64) -> Fireworks {
        let mut fw = Fireworks::new(FireworksConfig::default(), seed);
        fw.resize(Vec2::new(1280.0, 720.0));
        fw
    }

    /// Runs frames until idle, returns the time of the finishing frame
    fn run_to_idle(fw: &mut Fireworks, mut now: f64, limit_frames: usize) -> Option<f64> {
        for _ in 0..limit_frames {
            if fw.step(now) == FrameStatus::Finished {
                return Some(now);
            }
            now += FRAME_MS;
        }
        None
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color(0xff4d6d).to_css(), "#ff4d6d");
        assert_eq!(Color(0x06d6a0).to_css(), "#06d6a0");
    }

    #[test]
    fn test_idle_step_does_nothing() {
        let mut fw = engine(1);
        assert_eq!(fw.step(0.0), FrameStatus::Finished);
        assert!(fw.particles().is_empty());
        assert_eq!(fw.bursts(), 0);
    }

    #[test]
    fn test_first_frame_bursts() {
        let mut fw = engine(2);
        fw.activate(1000.0);
        assert_eq!(fw.phase(), Phase::Running);
        assert_eq!(fw.step(12_345.0), FrameStatus::Continue);
        assert_eq!(fw.bursts(), 1);
        assert_eq!(fw.particles().len(), 90);
    }

    #[test]
    fn test_burst_interval_respected() {
        let mut fw = engine(3);
        fw.activate(6000.0);
        fw.step(0.0);
        fw.step(100.0);
        fw.step(259.0);
        assert_eq!(fw.bursts(), 1);
        fw.step(260.0);
        assert_eq!(fw.bursts(), 2);
    }

    #[test]
    fn test_burst_count_over_duration() {
        let mut fw = engine(4);
        fw.activate(6000.0);
        let mut now = 0.0;
        while now < 6000.0 {
            fw.step(now);
            now += 10.0;
        }
        let expected = (6000.0 / 260.0f64).floor() as u32;
        assert!(fw.bursts() == expected || fw.bursts() == expected + 1);
    }

    #[test]
    fn test_scenario_one_second_show() {
        let mut fw = engine(5);
        let t0 = 50_000.0;
        fw.activate(1000.0);

        // First burst happens on the very first frame
        fw.step(t0);
        assert_eq!(fw.bursts(), 1);

        let mut now = t0 + FRAME_MS;
        while now - t0 < 1000.0 {
            assert_eq!(fw.step(now), FrameStatus::Continue);
            assert_eq!(fw.phase(), Phase::Running);
            now += FRAME_MS;
        }

        let max_frames = fw.config().max_lifetime_frames() as usize + 2;
        let finished = run_to_idle(&mut fw, now, max_frames).expect("engine should go idle");
        assert!(finished - t0 >= 1000.0);
        assert!(finished - t0 <= 1000.0 + max_frames as f64 * FRAME_MS);
        assert!(fw.is_idle());
        assert!(fw.particles().is_empty());
    }

    #[test]
    fn test_draining_spawns_nothing() {
        let mut fw = engine(6);
        fw.activate(100.0);
        fw.step(0.0);
        fw.step(100.0);
        assert_eq!(fw.phase(), Phase::Draining);
        let bursts = fw.bursts();
        let before = fw.particles().len();
        fw.step(400.0);
        assert_eq!(fw.bursts(), bursts);
        assert!(fw.particles().len() <= before);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut fw = engine(7);
        fw.activate(0.0);
        assert_eq!(fw.step(0.0), FrameStatus::Finished);
        assert_eq!(fw.bursts(), 0);
        assert!(fw.is_idle());
    }

    #[test]
    fn test_deactivate_clears_everything() {
        let mut fw = engine(8);
        fw.activate(6000.0);
        fw.step(0.0);
        assert!(!fw.particles().is_empty());
        fw.deactivate();
        assert!(fw.is_idle());
        assert!(fw.particles().is_empty());
        assert_eq!(fw.bursts(), 0);
        assert_eq!(fw.step(16.0), FrameStatus::Finished);
    }

    #[test]
    fn test_reactivation_starts_fresh() {
        let mut fw = engine(9);
        fw.activate(500.0);
        fw.step(0.0);
        fw.step(300.0);
        assert_eq!(fw.bursts(), 2);

        fw.activate(500.0);
        assert!(fw.particles().is_empty());
        assert_eq!(fw.bursts(), 0);
        // New clock: bursts immediately even though only 10ms passed
        fw.step(310.0);
        assert_eq!(fw.bursts(), 1);
        assert_eq!(fw.particles().len(), 90);
    }

    #[test]
    fn test_burst_particles_within_ranges() {
        let mut fw = engine(10);
        let origin = Vec2::new(300.0, 200.0);
        fw.spawn_burst(origin);
        let c = FireworksConfig::default();
        assert_eq!(fw.particles().len(), 90);
        for p in fw.particles() {
            assert_eq!(p.pos, origin);
            assert_eq!(p.life, 1.0);
            let speed = p.vel.length();
            assert!(speed >= c.speed_min - 1e-3 && speed <= c.speed_min + c.speed_span + 1e-3);
            assert!(p.decay >= c.decay_min && p.decay <= c.decay_min + c.decay_span);
            assert!(p.radius >= c.radius_min && p.radius <= c.radius_min + c.radius_span);
            assert!(c.palette.contains(&p.color.0));
        }
    }

    #[test]
    fn test_origin_in_upper_middle() {
        let mut fw = engine(11);
        for _ in 0..100 {
            let o = fw.random_origin();
            assert!(o.x >= 80.0 && o.x <= 1200.0);
            assert!(o.y >= 80.0 && o.y <= 80.0 + 720.0 * 0.55);
        }
        // Narrow viewport pins x to the margin
        fw.resize(Vec2::new(100.0, 300.0));
        assert_eq!(fw.random_origin().x, 80.0);
    }

    #[test]
    fn test_gravity_and_drag() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 1.0,
            decay: 0.5,
            radius: 1.0,
            color: Color(0),
        };
        assert!(p.step(0.06, 0.99));
        assert_eq!(p.pos, Vec2::new(1.0, 0.0));
        assert!((p.vel.x - 0.99).abs() < 1e-6);
        assert!((p.vel.y - 0.0594).abs() < 1e-6);
        assert!(!p.step(0.06, 0.99));
        assert_eq!(p.alpha(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_alpha_fades_monotonically(
            decay in 0.012f32..0.03,
            vx in -6.5f32..6.5,
            vy in -6.5f32..6.5,
        ) {
            let mut p = Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(vx, vy),
                life: 1.0,
                decay,
                radius: 2.0,
                color: Color(0xffffff),
            };
            let mut last = p.alpha();
            let mut frames = 0;
            while p.step(0.06, 0.99) {
                prop_assert!(p.alpha() <= last);
                last = p.alpha();
                frames += 1;
                prop_assert!(frames <= 84);
            }
            prop_assert_eq!(p.alpha(), 0.0);
        }

        #[test]
        fn prop_idle_within_duration_plus_lifetime(seed in any::<u64>(), duration in 0.0f64..3000.0) {
            let mut fw = engine(seed);
            fw.activate(duration);
            let t0 = 1_000.0;
            let limit = ((duration / FRAME_MS).ceil() as usize) + 84 + 2;
            let finished = run_to_idle(&mut fw, t0, limit);
            prop_assert!(finished.is_some());
            let finished = finished.unwrap();
            prop_assert!(finished - t0 >= duration);
            prop_assert!(fw.particles().is_empty());
        }

        #[test]
        fn prop_every_burst_has_fixed_size(seed in any::<u64>(), bursts in 1usize..5) {
            let mut fw = engine(seed);
            for i in 0..bursts {
                fw.spawn_burst(Vec2::new(100.0, 100.0));
                prop_assert_eq!(fw.particles().len(), (i + 1) * 90);
            }
        }
    }
}
