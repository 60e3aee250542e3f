//! Deterministic card simulation
//!
//! Everything the card does lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time is passed in (frame clock in ms), never read
//! - No DOM, canvas or platform dependencies

pub mod card;
pub mod evasion;
pub mod fireworks;
pub mod geometry;
pub mod schedule;

pub use card::Card;
pub use evasion::{Evader, ScalePair, farthest_from, sample_candidates};
pub use fireworks::{Color, Fireworks, FrameStatus, Particle, Phase};
pub use geometry::{Layout, Rect};
pub use schedule::{FrameHandle, FrameLoop, FrameScheduler, ManualScheduler};
