//! Don't Say No - an interactive greeting card
//!
//! Core modules:
//! - `sim`: Deterministic card logic (evading button, fireworks, frame loop)
//! - `renderer`: Canvas 2D drawing of the fireworks overlay
//! - `platform`: Browser glue (DOM measurement, animation frames)
//! - `settings`: Tunables and preferences persisted in LocalStorage

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{EvasionConfig, FireworksConfig, Settings};
pub use sim::{Card, Evader, Fireworks};

/// Card tuning constants
pub mod consts {
    // === Evasion ===

    /// Proximity radius (logical px) at full scale
    pub const EVADE_BASE_RADIUS: f32 = 120.0;
    /// Floor applied to the scale when shrinking the proximity radius
    pub const EVADE_MIN_SCALE_FACTOR: f32 = 0.6;
    /// Minimum time between proximity-triggered relocations
    pub const EVADE_MIN_INTERVAL_MS: f64 = 70.0;
    /// Random candidates sampled per relocation
    pub const RELOCATION_CANDIDATES: usize = 12;

    /// Evasive button shrinks by this factor per relocation...
    pub const SHRINK_FACTOR: f32 = 0.92;
    /// ...but never below this
    pub const MIN_EVASIVE_SCALE: f32 = 0.35;
    /// Accepting button grows by this factor per relocation...
    pub const GROW_FACTOR: f32 = 1.06;
    /// ...but never above this
    pub const MAX_ALTERNATIVE_SCALE: f32 = 1.9;

    /// Gap between the evasive button and the right edge on initial placement
    pub const INITIAL_RIGHT_MARGIN: f32 = 24.0;
    /// Position used before the playground has been measured
    pub const INITIAL_POSITION: (f32, f32) = (220.0, 40.0);

    // === Fireworks ===

    /// Total time new bursts are spawned
    pub const FIREWORKS_DURATION_MS: f64 = 6000.0;
    /// Time between bursts
    pub const BURST_INTERVAL_MS: f64 = 260.0;
    /// Particles per burst
    pub const BURST_SIZE: usize = 90;

    /// Downward acceleration per frame (px/frame²)
    pub const GRAVITY: f32 = 0.06;
    /// Velocity multiplier per frame
    pub const DRAG: f32 = 0.99;

    /// Launch speed range (px/frame)
    pub const PARTICLE_SPEED_MIN: f32 = 2.0;
    pub const PARTICLE_SPEED_SPAN: f32 = 4.5;
    /// Life lost per frame
    pub const PARTICLE_DECAY_MIN: f32 = 0.012;
    pub const PARTICLE_DECAY_SPAN: f32 = 0.018;
    /// Radius range (px)
    pub const PARTICLE_RADIUS_MIN: f32 = 1.2;
    pub const PARTICLE_RADIUS_SPAN: f32 = 1.8;

    /// Burst origins keep this far from the left, right and top edges
    pub const BURST_MARGIN: f32 = 80.0;
    /// Fraction of the viewport height below the margin used for origins
    pub const BURST_HEIGHT_FRACTION: f32 = 0.55;

    /// Firework palette (0xRRGGBB)
    pub const PALETTE: [u32; 7] = [
        0xff4d6d, 0xffd166, 0x06d6a0, 0x4cc9f0, 0xa78bfa, 0xf472b6, 0xfb7185,
    ];

    // === Text ===

    pub const DEFAULT_QUESTION: &str = "Will you be my valentine?";
    pub const PROMPT_CAPTION: &str = "Choose wisely 😄";
    pub const CELEBRATION_CAPTION: &str = "YAAAY!!! 🎉💞";
}

/// Longest a particle can live, in frames, given the slowest decay
#[inline]
pub fn max_particle_lifetime_frames(decay_min: f32) -> u32 {
    if decay_min <= 0.0 {
        return u32::MAX;
    }
    (1.0 / decay_min).ceil() as u32
}
