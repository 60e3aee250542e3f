//! Animation frame bookkeeping
//!
//! The browser hands out an id per `requestAnimationFrame` call; keeping it
//! around is what makes cancellation on teardown possible.

/// Id of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that can run a callback on the next display refresh
pub trait FrameScheduler {
    /// Ask for one frame. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Cancel a frame that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Tracks the single outstanding frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already queued
    pub fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.pending.is_none() {
            self.pending = scheduler.request_frame();
            if self.pending.is_none() {
                log::warn!("Animation frame request refused");
            }
        }
    }

    /// The queued frame is running now
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Drop the queued frame, if any
    pub fn cancel(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}

/// Scheduler that only records requests; frames are fired by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    /// Requested and not yet fired or cancelled
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending frame, as if the display refreshed
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::new();
        frames.schedule(&mut sched);
        frames.schedule(&mut sched);
        assert_eq!(sched.pending.len(), 1);
        assert!(frames.is_pending());
    }

    #[test]
    fn test_fired_allows_next_request() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::new();
        frames.schedule(&mut sched);
        sched.fire();
        frames.fired();
        assert!(!frames.is_pending());
        frames.schedule(&mut sched);
        assert_eq!(sched.pending, vec![FrameHandle(2)]);
    }

    #[test]
    fn test_cancel_releases_pending_frame() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::new();
        frames.schedule(&mut sched);
        frames.cancel(&mut sched);
        assert!(!frames.is_pending());
        assert!(sched.pending.is_empty());
        assert_eq!(sched.cancelled, vec![FrameHandle(1)]);

        // Nothing left to cancel
        frames.cancel(&mut sched);
        assert_eq!(sched.cancelled.len(), 1);
    }
}
