use alloc::vec::Vec;

use crate::classes;
use crate::dom::Dom;
use crate::line;
use crate::options::SpyOptions;
use crate::registry::{self, Section};
use crate::scheduler::{FrameScheduler, Schedule};
use crate::types::{ScrollDirection, SectionContext};

/// A headless scroll-section activation engine.
///
/// The engine holds no event loop of its own; the host wires its scroll/resize sources and
/// frame/timer ticks to the `on_*` entry points and services pending frames via
/// [`needs_frame`](Self::needs_frame)/[`on_frame`](Self::on_frame). Every entry point reads
/// the most recent state from the [`Dom`] at execution time, so coalesced bursts observe the
/// latest scroll offset rather than the one that triggered them.
///
/// No public or event-driven path panics or propagates an error; failures degrade to no-ops.
pub struct ScrollSpy<D: Dom> {
    dom: D,
    options: SpyOptions<D::Element>,
    sections: Vec<Section<D::Element>>,
    scheduler: FrameScheduler,
    active: Option<usize>,
    direction: ScrollDirection,
    last_y: f64,
    destroyed: bool,
}

impl<D: Dom> ScrollSpy<D> {
    /// Creates the engine and starts tracking.
    ///
    /// Sections are normalized, the root class (if any) is applied, geometry is cached, the
    /// soft refresh is armed, and an initial recomputation is scheduled. In throttle mode the
    /// initial run happens synchronously; in frame mode the host's first granted frame runs it.
    pub fn new(dom: D, options: SpyOptions<D::Element>, now_ms: u64) -> Self {
        let sections = registry::normalize_sections(&dom, &options);
        spy_debug!(
            sections = sections.len(),
            use_raf = options.use_raf,
            "ScrollSpy::new"
        );

        let mut scheduler = FrameScheduler::new(options.use_raf, options.throttle_ms);
        if options.soft_refresh {
            scheduler.arm_soft_refresh(now_ms.saturating_add(options.soft_refresh_delay_ms));
        }

        if let Some(root_class) = options.root_class.as_deref().filter(|c| !c.is_empty()) {
            dom.add_class(&dom.root(), root_class);
        }

        let last_y = dom.scroll_y();
        let mut spy = Self {
            dom,
            options,
            sections,
            scheduler,
            active: None,
            direction: ScrollDirection::Down,
            last_y,
            destroyed: false,
        };
        spy.refresh();
        spy.schedule(now_ms);
        spy
    }

    pub fn options(&self) -> &SpyOptions<D::Element> {
        &self.options
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn into_dom(self) -> D {
        self.dom
    }

    pub fn sections(&self) -> &[Section<D::Element>] {
        &self.sections
    }

    /// The currently active section, if any.
    pub fn active(&self) -> Option<&Section<D::Element>> {
        self.active.map(|idx| &self.sections[idx])
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Scroll event entry point. Samples direction, then schedules a recomputation.
    pub fn on_scroll(&mut self, now_ms: u64) {
        if self.destroyed || self.scheduler.is_paused() {
            return;
        }
        if self.options.detect_direction {
            let y = self.dom.scroll_y();
            self.direction = if y >= self.last_y {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            };
            self.last_y = y;
        }
        self.schedule(now_ms);
    }

    /// Resize/orientation-change entry point. Re-caches geometry, then schedules.
    pub fn on_resize(&mut self, now_ms: u64) {
        if self.destroyed || self.scheduler.is_paused() {
            return;
        }
        self.refresh();
        self.schedule(now_ms);
    }

    /// Whether the host should grant an animation frame.
    pub fn needs_frame(&self) -> bool {
        !self.destroyed && self.scheduler.frame_pending()
    }

    /// Services a granted animation frame. Returns whether a recomputation ran.
    pub fn on_frame(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        if self.scheduler.take_frame() {
            self.run();
            return true;
        }
        false
    }

    /// Timer servicing entry point; fires the soft refresh once its deadline passes.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        if self.scheduler.take_soft_refresh(now_ms) {
            spy_trace!(now_ms, "soft refresh");
            self.refresh();
            self.schedule(now_ms);
        }
    }

    /// Re-caches every section's document-coordinate extent from current layout.
    ///
    /// Idempotent; call whenever layout may have changed.
    pub fn refresh(&mut self) {
        let scroll_y = self.dom.scroll_y();
        for section in self.sections.iter_mut() {
            let (top, bottom) = self.dom.bounding_extent(&section.target);
            section.top = top + scroll_y;
            section.bottom = bottom + scroll_y;
        }
    }

    /// Re-caches geometry and schedules a recomputation.
    pub fn refresh_now(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.refresh();
        self.schedule(now_ms);
    }

    /// Suspends the engine: events and timers are ignored until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if !self.destroyed {
            self.scheduler.pause();
        }
    }

    /// Resumes the engine, re-caches geometry, and schedules a recomputation.
    pub fn resume(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.scheduler.resume();
        self.refresh();
        self.schedule(now_ms);
    }

    /// Tears the engine down: deactivates the active section, clears every managed class,
    /// removes the root class, and silences all further entry points.
    ///
    /// The host is expected to detach its event sources; a stray event after `destroy` is a
    /// no-op either way.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        let line = line::detection_line(&self.dom, &self.options);
        if let Some(idx) = self.active.take() {
            self.deactivate(idx, line);
        }
        // Defensive sweep: classes may linger if the host mutated them behind our back.
        for section in &self.sections {
            self.dom.remove_class(&section.target, &section.enter_class);
            classes::apply_targets(&self.dom, &section.apply_to, false);
        }

        if let Some(root_class) = self.options.root_class.as_deref().filter(|c| !c.is_empty()) {
            self.dom.remove_class(&self.dom.root(), root_class);
        }

        self.destroyed = true;
        spy_debug!("ScrollSpy::destroy");
    }

    fn schedule(&mut self, now_ms: u64) {
        match self.scheduler.request(now_ms) {
            Schedule::RunNow => self.run(),
            Schedule::Deferred | Schedule::Skipped => {}
        }
    }

    /// One recomputation: pick the first section whose extent contains the line, transition
    /// if it changed, otherwise report progress.
    fn run(&mut self) {
        let line = line::detection_line(&self.dom, &self.options);
        let next = self
            .sections
            .iter()
            .position(|s| line >= s.top && line < s.bottom);

        if next == self.active {
            if let Some(idx) = self.active {
                self.emit_update(idx, line);
            }
            return;
        }

        // Outgoing always settles before the incoming section lights up.
        if let Some(idx) = self.active {
            self.deactivate(idx, line);
        }
        if let Some(idx) = next {
            self.activate(idx, line);
        }
        self.active = next;

        if self.options.debug {
            spy_debug!(
                active = ?next.and_then(|idx| self.sections[idx].id.as_deref()),
                direction = self.direction.as_str(),
                line,
                "active section changed"
            );
        }
    }

    fn activate(&mut self, idx: usize, line: f64) {
        let ctx = self.context(idx, line);
        self.sections[idx].active = true;
        let section = &self.sections[idx];
        self.dom.add_class(&section.target, &section.enter_class);
        classes::apply_targets(&self.dom, &section.apply_to, true);
        if let Some(cb) = &section.on_enter {
            cb(&ctx);
        }
    }

    fn deactivate(&mut self, idx: usize, line: f64) {
        let ctx = self.context(idx, line);
        self.sections[idx].active = false;
        let section = &self.sections[idx];
        self.dom.remove_class(&section.target, &section.enter_class);
        classes::apply_targets(&self.dom, &section.apply_to, false);
        if let Some(cb) = &section.on_leave {
            cb(&ctx);
        }
    }

    fn emit_update(&self, idx: usize, line: f64) {
        let ctx = self.context(idx, line);
        let section = &self.sections[idx];
        if let Some(cb) = &section.on_update {
            cb(&ctx);
        }
        if let Some(cb) = &self.options.on_update {
            cb(&ctx);
        }
    }

    fn context(&self, idx: usize, line: f64) -> SectionContext<D::Element> {
        let section = &self.sections[idx];
        SectionContext {
            target: section.target.clone(),
            id: section.id.clone(),
            direction: self.direction,
            scroll_y: self.dom.scroll_y(),
            line,
            top: section.top,
            bottom: section.bottom,
            progress: line::progress(line, section.top, section.bottom),
        }
    }
}

impl<D: Dom> core::fmt::Debug for ScrollSpy<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("sections", &self.sections.len())
            .field("active", &self.active)
            .field("direction", &self.direction)
            .field("paused", &self.scheduler.is_paused())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
