/// Outcome of a scheduling request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Run the recomputation synchronously, now.
    RunNow,
    /// A frame was armed; the host services it via `needs_frame`/`on_frame`.
    Deferred,
    /// Coalesced into an already-pending frame, throttled, or paused.
    Skipped,
}

/// Rate limiter for recomputations.
///
/// In frame mode this is a single-slot pending flag: the first request arms a frame and every
/// request until the frame is serviced is a no-op, so bursts of scroll events collapse into
/// one run that observes the most recent scroll state. In throttle mode requests run
/// immediately unless fewer than `throttle_ms` have elapsed since the last run.
///
/// The scheduler also owns the fire-once soft-refresh deadline. The deadline is consumed the
/// first time it is due, and acts only if the scheduler is not paused at that moment.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    use_raf: bool,
    throttle_ms: u64,
    paused: bool,
    frame_pending: bool,
    last_run_ms: Option<u64>,
    soft_refresh_at: Option<u64>,
}

impl FrameScheduler {
    pub fn new(use_raf: bool, throttle_ms: u64) -> Self {
        Self {
            use_raf,
            throttle_ms,
            paused: false,
            frame_pending: false,
            last_run_ms: None,
            soft_refresh_at: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn request(&mut self, now_ms: u64) -> Schedule {
        if self.paused {
            return Schedule::Skipped;
        }

        if self.use_raf {
            if self.frame_pending {
                return Schedule::Skipped;
            }
            self.frame_pending = true;
            return Schedule::Deferred;
        }

        match self.last_run_ms {
            Some(last) if now_ms.saturating_sub(last) < self.throttle_ms => Schedule::Skipped,
            _ => {
                self.last_run_ms = Some(now_ms);
                Schedule::RunNow
            }
        }
    }

    /// Services a granted frame. Always clears the pending slot; returns whether the run
    /// should happen (a frame landing while paused is dropped).
    pub fn take_frame(&mut self) -> bool {
        let was_pending = self.frame_pending;
        self.frame_pending = false;
        was_pending && !self.paused
    }

    pub fn arm_soft_refresh(&mut self, deadline_ms: u64) {
        self.soft_refresh_at = Some(deadline_ms);
    }

    pub fn take_soft_refresh(&mut self, now_ms: u64) -> bool {
        match self.soft_refresh_at {
            Some(deadline) if now_ms >= deadline => {
                self.soft_refresh_at = None;
                !self.paused
            }
            _ => false,
        }
    }
}
