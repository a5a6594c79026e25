use scrollspy::{Dom, ScrollSpy, SpyOptions};

/// Host-loop glue around a [`ScrollSpy`].
///
/// A host with an event loop typically has three signal sources: scroll/resize events, a
/// per-frame tick, and wall-clock timers. The driver forwards events and collapses the
/// latter two into one [`tick`](Self::tick) call per host frame: timers are serviced first,
/// then a pending animation frame (if any) is granted, mirroring a browser that runs timer
/// callbacks before the next paint.
pub struct Driver<D: Dom> {
    spy: ScrollSpy<D>,
}

impl<D: Dom> Driver<D> {
    pub fn new(dom: D, options: SpyOptions<D::Element>, now_ms: u64) -> Self {
        Self {
            spy: ScrollSpy::new(dom, options, now_ms),
        }
    }

    pub fn from_spy(spy: ScrollSpy<D>) -> Self {
        Self { spy }
    }

    pub fn spy(&self) -> &ScrollSpy<D> {
        &self.spy
    }

    pub fn spy_mut(&mut self) -> &mut ScrollSpy<D> {
        &mut self.spy
    }

    pub fn into_spy(self) -> ScrollSpy<D> {
        self.spy
    }

    /// Call when the host reports a scroll offset change.
    pub fn on_scroll(&mut self, now_ms: u64) {
        self.spy.on_scroll(now_ms);
    }

    /// Call on resize or orientation change.
    pub fn on_resize(&mut self, now_ms: u64) {
        self.spy.on_resize(now_ms);
    }

    /// Advances the host loop by one frame. Returns whether a granted animation frame ran a
    /// recomputation (throttle-mode runs happen synchronously inside the event calls).
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.spy.tick(now_ms);
        if self.spy.needs_frame() {
            return self.spy.on_frame();
        }
        false
    }
}

impl<D: Dom> core::fmt::Debug for Driver<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Driver").field("spy", &self.spy).finish()
    }
}
