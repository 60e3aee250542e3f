//! Card tunables and preferences
//!
//! Persisted as JSON in LocalStorage so the card can be tweaked without a
//! rebuild. Every field falls back to its default when missing.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Evasive button tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Proximity radius at full scale (logical px)
    pub base_radius: f32,
    /// Floor for the scale used to shrink the proximity radius
    pub min_scale_factor: f32,
    /// Minimum time between proximity-triggered relocations
    pub min_interval_ms: f64,
    /// Random candidates per relocation
    pub candidates: usize,
    pub shrink_factor: f32,
    pub min_scale: f32,
    pub grow_factor: f32,
    pub max_scale: f32,
    /// Gap to the right edge on initial placement
    pub initial_margin: f32,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            base_radius: EVADE_BASE_RADIUS,
            min_scale_factor: EVADE_MIN_SCALE_FACTOR,
            min_interval_ms: EVADE_MIN_INTERVAL_MS,
            candidates: RELOCATION_CANDIDATES,
            shrink_factor: SHRINK_FACTOR,
            min_scale: MIN_EVASIVE_SCALE,
            grow_factor: GROW_FACTOR,
            max_scale: MAX_ALTERNATIVE_SCALE,
            initial_margin: INITIAL_RIGHT_MARGIN,
        }
    }
}

impl EvasionConfig {
    /// Clamp values that would break the chase (no candidates, inverted factors)
    pub fn sanitized(mut self) -> Self {
        self.base_radius = self.base_radius.max(0.0);
        self.min_scale_factor = self.min_scale_factor.max(0.0);
        self.min_interval_ms = self.min_interval_ms.max(0.0);
        self.candidates = self.candidates.max(1);
        self.shrink_factor = self.shrink_factor.clamp(0.0, 1.0);
        self.min_scale = self.min_scale.clamp(0.0, 1.0);
        self.grow_factor = self.grow_factor.max(1.0);
        self.max_scale = self.max_scale.max(1.0);
        self.initial_margin = self.initial_margin.max(0.0);
        self
    }
}

/// Fireworks tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// How long new bursts keep spawning
    pub duration_ms: f64,
    pub burst_interval_ms: f64,
    pub burst_size: usize,
    pub gravity: f32,
    pub drag: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    pub decay_min: f32,
    pub decay_span: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    pub burst_margin: f32,
    pub burst_height_fraction: f32,
    /// 0xRRGGBB colors picked uniformly per particle
    pub palette: Vec<u32>,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            duration_ms: FIREWORKS_DURATION_MS,
            burst_interval_ms: BURST_INTERVAL_MS,
            burst_size: BURST_SIZE,
            gravity: GRAVITY,
            drag: DRAG,
            speed_min: PARTICLE_SPEED_MIN,
            speed_span: PARTICLE_SPEED_SPAN,
            decay_min: PARTICLE_DECAY_MIN,
            decay_span: PARTICLE_DECAY_SPAN,
            radius_min: PARTICLE_RADIUS_MIN,
            radius_span: PARTICLE_RADIUS_SPAN,
            burst_margin: BURST_MARGIN,
            burst_height_fraction: BURST_HEIGHT_FRACTION,
            palette: PALETTE.to_vec(),
        }
    }
}

impl FireworksConfig {
    /// Clamp values that would stall the animation (particles that never die,
    /// drag that accelerates, empty palette)
    pub fn sanitized(mut self) -> Self {
        self.duration_ms = self.duration_ms.max(0.0);
        self.burst_interval_ms = self.burst_interval_ms.max(0.0);
        self.drag = self.drag.clamp(0.0, 1.0);
        self.decay_min = self.decay_min.max(PARTICLE_DECAY_MIN / 10.0);
        self.decay_span = self.decay_span.max(0.0);
        self.speed_span = self.speed_span.max(0.0);
        self.radius_min = self.radius_min.max(0.0);
        self.radius_span = self.radius_span.max(0.0);
        self.burst_margin = self.burst_margin.max(0.0);
        self.burst_height_fraction = self.burst_height_fraction.clamp(0.0, 1.0);
        if self.palette.is_empty() {
            self.palette = PALETTE.to_vec();
        }
        self
    }

    /// Longest a particle can live, in frames
    pub fn max_lifetime_frames(&self) -> u32 {
        crate::max_particle_lifetime_frames(self.decay_min)
    }
}

/// Card settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Headline shown above the buttons
    pub question: String,
    pub evasion: EvasionConfig,
    pub fireworks: FireworksConfig,

    // === Accessibility ===
    /// Reduced motion (fewer, slower bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            question: DEFAULT_QUESTION.to_string(),
            evasion: EvasionConfig::default(),
            fireworks: FireworksConfig::default(),
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Evasion tuning with nonsensical values clamped
    pub fn effective_evasion(&self) -> EvasionConfig {
        self.evasion.clone().sanitized()
    }

    /// Fireworks tuning (respects reduced_motion)
    pub fn effective_fireworks(&self) -> FireworksConfig {
        let mut fireworks = self.fireworks.clone().sanitized();
        if self.reduced_motion {
            fireworks.burst_size = (fireworks.burst_size / 2).max(1);
            fireworks.burst_interval_ms *= 2.0;
        }
        fireworks
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dont_say_no_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No LocalStorage on native, using defaults ({})", Self::STORAGE_KEY);
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.fireworks.burst_size, 90);
        assert_eq!(s.fireworks.burst_interval_ms, 260.0);
        assert_eq!(s.fireworks.duration_ms, 6000.0);
        assert_eq!(s.evasion.candidates, 12);
        assert_eq!(s.evasion.base_radius, 120.0);
        assert_eq!(s.fireworks.palette.len(), 7);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let s = Settings::from_json(r#"{"question":"Tariro?","fireworks":{"burst_size":10}}"#);
        assert_eq!(s.question, "Tariro?");
        assert_eq!(s.fireworks.burst_size, 10);
        assert_eq!(s.fireworks.burst_interval_ms, BURST_INTERVAL_MS);
        assert_eq!(s.evasion, EvasionConfig::default());
    }

    #[test]
    fn test_malformed_json_uses_defaults() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.reduced_motion = true;
        s.evasion.candidates = 5;
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json), s);
    }

    #[test]
    fn test_reduced_motion_thins_fireworks() {
        let mut s = Settings::default();
        s.reduced_motion = true;
        let fw = s.effective_fireworks();
        assert_eq!(fw.burst_size, 45);
        assert_eq!(fw.burst_interval_ms, 520.0);
    }

    #[test]
    fn test_sanitize_clamps_broken_values() {
        let evasion = EvasionConfig {
            candidates: 0,
            shrink_factor: 1.5,
            grow_factor: 0.5,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(evasion.candidates, 1);
        assert_eq!(evasion.shrink_factor, 1.0);
        assert_eq!(evasion.grow_factor, 1.0);

        let fireworks = FireworksConfig {
            drag: 1.2,
            decay_min: 0.0,
            palette: Vec::new(),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(fireworks.drag, 1.0);
        assert!(fireworks.decay_min > 0.0);
        assert_eq!(fireworks.palette.len(), PALETTE.len());
    }
}
