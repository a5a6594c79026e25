use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::registry::SectionSpec;
use crate::types::{EnterAt, SectionContext};

/// A callback fired with a read-only context snapshot.
///
/// Callbacks run synchronously on the host's event path and carry no `Send`/`Sync` bounds:
/// the engine is single-threaded and cooperative, and element handles of real hosts rarely
/// cross threads.
pub type SectionCallback<E> = Arc<dyn Fn(&SectionContext<E>)>;

/// A fixed-header style offset added to the detection line.
#[derive(Clone)]
pub enum Offset {
    /// A fixed pixel offset.
    Value(f64),
    /// A lazily evaluated offset provider (called fresh on every recomputation).
    Provider(Arc<dyn Fn() -> f64>),
}

impl Offset {
    /// Non-finite results resolve to 0 so a misbehaving provider cannot poison the line.
    pub(crate) fn resolve(&self) -> f64 {
        let v = match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        };
        if v.is_finite() { v } else { 0.0 }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// The `sections` configuration value.
///
/// A selector string or element collection auto-normalizes each match into a section bound to
/// the default active class; an explicit list allows per-section classes and callbacks.
pub enum Sections<E> {
    List(Vec<SectionSpec<E>>),
    Selector(String),
    Elements(Vec<E>),
}

impl<E> Default for Sections<E> {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl<E> core::fmt::Debug for Sections<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::List(specs) => f.debug_tuple("List").field(&specs.len()).finish(),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Elements(els) => f.debug_tuple("Elements").field(&els.len()).finish(),
        }
    }
}

/// Configuration for [`crate::ScrollSpy`].
pub struct SpyOptions<E> {
    pub sections: Sections<E>,
    /// Fixed-header offset added to the detection line.
    pub offset: Offset,
    /// Class applied to a section's own element while it is active.
    pub active_class: String,
    /// Optional class added to the document root while the engine is alive.
    pub root_class: Option<String>,
    /// Where the detection line sits inside the viewport.
    pub enter_at: EnterAt,
    /// Derive table-of-contents bindings from section ids.
    pub bind_toc: bool,
    /// TOC root selector used by the id-based derivation, e.g. `".toc"`.
    pub toc_selector: String,
    /// Global update callback, fired on every recomputation that keeps the active section.
    pub on_update: Option<SectionCallback<E>>,
    /// Coalesce recomputations to one per animation frame. When false, the fixed-interval
    /// throttle below applies instead.
    pub use_raf: bool,
    /// Minimum milliseconds between recomputations when `use_raf` is false.
    pub throttle_ms: u64,
    pub detect_direction: bool,
    /// Schedule one extra geometry refresh shortly after construction to absorb late layout
    /// shifts (fonts, images).
    pub soft_refresh: bool,
    pub soft_refresh_delay_ms: u64,
    /// Emit a debug log line on every activation change.
    pub debug: bool,
}

impl<E> SpyOptions<E> {
    pub fn new() -> Self {
        Self {
            sections: Sections::default(),
            offset: Offset::default(),
            active_class: String::from("is-active"),
            root_class: None,
            enter_at: EnterAt::Top,
            bind_toc: false,
            toc_selector: String::new(),
            on_update: None,
            use_raf: true,
            throttle_ms: 50,
            detect_direction: true,
            soft_refresh: true,
            soft_refresh_delay_ms: 400,
            debug: false,
        }
    }

    pub fn with_sections(mut self, sections: Sections<E>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_section_list(mut self, specs: Vec<SectionSpec<E>>) -> Self {
        self.sections = Sections::List(specs);
        self
    }

    pub fn with_section_selector(mut self, selector: impl Into<String>) -> Self {
        self.sections = Sections::Selector(selector.into());
        self
    }

    pub fn with_section_elements(mut self, elements: Vec<E>) -> Self {
        self.sections = Sections::Elements(elements);
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Offset::Value(offset);
        self
    }

    pub fn with_offset_provider(mut self, offset: impl Fn() -> f64 + 'static) -> Self {
        self.offset = Offset::Provider(Arc::new(offset));
        self
    }

    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    pub fn with_root_class(mut self, class: impl Into<String>) -> Self {
        self.root_class = Some(class.into());
        self
    }

    pub fn with_enter_at(mut self, enter_at: EnterAt) -> Self {
        self.enter_at = enter_at;
        self
    }

    pub fn with_bind_toc(mut self, bind_toc: bool) -> Self {
        self.bind_toc = bind_toc;
        self
    }

    pub fn with_toc_selector(mut self, selector: impl Into<String>) -> Self {
        self.toc_selector = selector.into();
        self
    }

    pub fn with_on_update(
        mut self,
        on_update: Option<impl Fn(&SectionContext<E>) + 'static>,
    ) -> Self {
        self.on_update = on_update.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_use_raf(mut self, use_raf: bool) -> Self {
        self.use_raf = use_raf;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_detect_direction(mut self, detect_direction: bool) -> Self {
        self.detect_direction = detect_direction;
        self
    }

    pub fn with_soft_refresh(mut self, soft_refresh: bool) -> Self {
        self.soft_refresh = soft_refresh;
        self
    }

    pub fn with_soft_refresh_delay_ms(mut self, delay_ms: u64) -> Self {
        self.soft_refresh_delay_ms = delay_ms;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<E> Default for SpyOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for SpyOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpyOptions")
            .field("sections", &self.sections)
            .field("offset", &self.offset)
            .field("active_class", &self.active_class)
            .field("root_class", &self.root_class)
            .field("enter_at", &self.enter_at)
            .field("bind_toc", &self.bind_toc)
            .field("toc_selector", &self.toc_selector)
            .field("use_raf", &self.use_raf)
            .field("throttle_ms", &self.throttle_ms)
            .field("detect_direction", &self.detect_direction)
            .field("soft_refresh", &self.soft_refresh)
            .field("soft_refresh_delay_ms", &self.soft_refresh_delay_ms)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// A partial configuration merged over [`SpyOptions`] as the last layer.
///
/// This is the explicit replacement for an ambient page-global override object: the caller
/// resolves defaults, builder values, and an optional external overlay into one configuration
/// with [`resolve_options`], and nothing is looked up implicitly at runtime.
///
/// Only plain-data fields can be overridden; sections, element handles, and callbacks stay
/// with the builder. With `feature = "serde"` the overlay deserializes from JSON/TOML, with
/// `enter_at` accepting `"top"`, `"center"`, `"bottom"`, or a bare number.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptionsOverlay {
    pub offset: Option<f64>,
    pub active_class: Option<String>,
    pub root_class: Option<String>,
    pub enter_at: Option<EnterAt>,
    pub bind_toc: Option<bool>,
    pub toc_selector: Option<String>,
    pub use_raf: Option<bool>,
    pub throttle_ms: Option<u64>,
    pub detect_direction: Option<bool>,
    pub soft_refresh: Option<bool>,
    pub soft_refresh_delay_ms: Option<u64>,
    pub debug: Option<bool>,
}

impl OptionsOverlay {
    pub fn apply_to<E>(&self, options: &mut SpyOptions<E>) {
        if let Some(v) = self.offset {
            options.offset = Offset::Value(v);
        }
        if let Some(v) = &self.active_class {
            options.active_class = v.clone();
        }
        if let Some(v) = &self.root_class {
            options.root_class = Some(v.clone());
        }
        if let Some(v) = self.enter_at {
            options.enter_at = v;
        }
        if let Some(v) = self.bind_toc {
            options.bind_toc = v;
        }
        if let Some(v) = &self.toc_selector {
            options.toc_selector = v.clone();
        }
        if let Some(v) = self.use_raf {
            options.use_raf = v;
        }
        if let Some(v) = self.throttle_ms {
            options.throttle_ms = v;
        }
        if let Some(v) = self.detect_direction {
            options.detect_direction = v;
        }
        if let Some(v) = self.soft_refresh {
            options.soft_refresh = v;
        }
        if let Some(v) = self.soft_refresh_delay_ms {
            options.soft_refresh_delay_ms = v;
        }
        if let Some(v) = self.debug {
            options.debug = v;
        }
    }
}

/// Resolves the final configuration: defaults, then builder values, then the overlay.
pub fn resolve_options<E>(
    mut options: SpyOptions<E>,
    overlay: Option<&OptionsOverlay>,
) -> SpyOptions<E> {
    if let Some(overlay) = overlay {
        overlay.apply_to(&mut options);
    }
    options
}
