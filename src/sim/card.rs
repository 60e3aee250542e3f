//! The card: one question, two buttons
//!
//! Owns the `accepted` flag. Before acceptance only the evader reacts to
//! input; after it only the fireworks run.

use glam::Vec2;

use super::evasion::Evader;
use super::fireworks::{Fireworks, FrameStatus};
use super::geometry::Layout;
use super::schedule::{FrameLoop, FrameScheduler};
use crate::consts::{CELEBRATION_CAPTION, PROMPT_CAPTION};
use crate::settings::Settings;

/// Card state shared by every event handler
#[derive(Debug)]
pub struct Card {
    question: String,
    accepted: bool,
    evader: Evader,
    fireworks: Fireworks,
    frames: FrameLoop,
}

impl Card {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            question: settings.question.clone(),
            accepted: false,
            evader: Evader::new(settings.effective_evasion(), seed),
            // Separate stream so the show does not depend on how often "No" ran
            fireworks: Fireworks::new(settings.effective_fireworks(), seed.rotate_left(32) ^ 0x9e37_79b9),
            frames: FrameLoop::new(),
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Text under the question
    pub fn caption(&self) -> &'static str {
        if self.accepted {
            CELEBRATION_CAPTION
        } else {
            PROMPT_CAPTION
        }
    }

    pub fn evader(&self) -> &Evader {
        &self.evader
    }

    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    /// True while an animation frame is queued
    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Returns true if the "No" button jumped
    pub fn on_pointer_move(&mut self, pointer: Vec2, layout: Option<Layout>, now_ms: f64) -> bool {
        if self.accepted {
            return false;
        }
        self.evader.on_pointer_move(pointer, layout, now_ms)
    }

    pub fn on_pointer_enter(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        if self.accepted {
            return None;
        }
        self.evader.on_pointer_enter(layout)
    }

    pub fn on_focus(&mut self, layout: Option<Layout>) -> Option<Vec2> {
        if self.accepted {
            return None;
        }
        self.evader.on_focus(layout)
    }

    /// Playground or viewport changed size. Returns the new "No" position
    /// when it was re-placed.
    pub fn on_resize(&mut self, layout: Option<Layout>, viewport: Vec2) -> Option<Vec2> {
        self.fireworks.resize(viewport);
        if self.accepted {
            return None;
        }
        self.evader.place_initial(layout)
    }

    /// "Yes" was clicked. Returns false if the card was already accepted.
    pub fn accept(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        self.evader.stop();
        let duration = self.fireworks.config().duration_ms;
        self.fireworks.activate(duration);
        self.frames.schedule(scheduler);
        log::info!("Accepted after {} escapes", self.evader.relocations());
        true
    }

    /// A queued animation frame fired
    pub fn on_frame(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> FrameStatus {
        self.frames.fired();
        let status = self.fireworks.step(now_ms);
        if status == FrameStatus::Continue {
            self.frames.schedule(scheduler);
        }
        status
    }

    /// Tear the view down: no input handling, no particles, no queued frame
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        self.evader.stop();
        self.fireworks.deactivate();
        self.frames.cancel(scheduler);
    }

    /// Page went into the back/forward cache: freeze input and frames but
    /// keep the show where it was
    pub fn suspend(&mut self, scheduler: &mut impl FrameScheduler) {
        self.evader.stop();
        self.frames.cancel(scheduler);
    }

    /// Page is shown again after `suspend` or `stop`. The evader only comes
    /// back while the question is still open; a show that was mid-run gets
    /// its frames back.
    pub fn resume(&mut self, scheduler: &mut impl FrameScheduler) {
        if !self.accepted {
            self.evader.start();
        } else if !self.fireworks.is_idle() {
            self.frames.schedule(scheduler);
        }
        log::debug!("Card resumed (accepted: {})", self.accepted);
    }
}
