use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::dom::Dom;
use crate::options::{SectionCallback, Sections, SpyOptions};
use crate::types::{ApplyTo, ClassTarget, SectionContext};

/// Class applied to TOC elements bound through auto-derivation.
pub const TOC_CURRENT_CLASS: &str = "is-current";

/// Per-section attribute that names an explicit TOC selector, overriding derivation.
pub const TOC_ATTRIBUTE: &str = "data-scrollspy-toc";

/// A section target: a literal element handle, or a selector resolved once at registration.
#[derive(Clone, Debug)]
pub enum TargetRef<E> {
    Element(E),
    Selector(String),
}

/// Caller-facing section specification, normalized into a [`Section`] at registration.
pub struct SectionSpec<E> {
    pub target: TargetRef<E>,
    /// Explicit identifier; falls back to the target element's id attribute.
    pub id: Option<String>,
    /// Per-section active class; falls back to the configured `active_class`.
    pub enter_class: Option<String>,
    pub apply_to: Vec<ApplyTo<E>>,
    pub on_enter: Option<SectionCallback<E>>,
    pub on_leave: Option<SectionCallback<E>>,
    pub on_update: Option<SectionCallback<E>>,
}

impl<E> SectionSpec<E> {
    pub fn element(target: E) -> Self {
        Self::from_target(TargetRef::Element(target))
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Self::from_target(TargetRef::Selector(selector.into()))
    }

    fn from_target(target: TargetRef<E>) -> Self {
        Self {
            target,
            id: None,
            enter_class: None,
            apply_to: Vec::new(),
            on_enter: None,
            on_leave: None,
            on_update: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_enter_class(mut self, class: impl Into<String>) -> Self {
        self.enter_class = Some(class.into());
        self
    }

    pub fn with_apply_to(mut self, entry: ApplyTo<E>) -> Self {
        self.apply_to.push(entry);
        self
    }

    pub fn with_on_enter(mut self, f: impl Fn(&SectionContext<E>) + 'static) -> Self {
        self.on_enter = Some(Arc::new(f));
        self
    }

    pub fn with_on_leave(mut self, f: impl Fn(&SectionContext<E>) + 'static) -> Self {
        self.on_leave = Some(Arc::new(f));
        self
    }

    pub fn with_on_update(mut self, f: impl Fn(&SectionContext<E>) + 'static) -> Self {
        self.on_update = Some(Arc::new(f));
        self
    }
}

/// A registered section descriptor.
///
/// Activation state and extents are owned by the engine; callers observe them through the
/// read accessors.
pub struct Section<E> {
    pub(crate) id: Option<String>,
    pub(crate) target: E,
    pub(crate) enter_class: String,
    pub(crate) apply_to: Vec<ApplyTo<E>>,
    pub(crate) on_enter: Option<SectionCallback<E>>,
    pub(crate) on_leave: Option<SectionCallback<E>>,
    pub(crate) on_update: Option<SectionCallback<E>>,
    pub(crate) active: bool,
    pub(crate) top: f64,
    pub(crate) bottom: f64,
}

impl<E> Section<E> {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    pub fn enter_class(&self) -> &str {
        &self.enter_class
    }

    pub fn apply_to(&self) -> &[ApplyTo<E>] {
        &self.apply_to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cached document-coordinate extent as `(top, bottom)`.
    pub fn extent(&self) -> (f64, f64) {
        (self.top, self.bottom)
    }
}

impl<E> core::fmt::Debug for Section<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("enter_class", &self.enter_class)
            .field("apply_to", &self.apply_to.len())
            .field("active", &self.active)
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .finish_non_exhaustive()
    }
}

/// Normalizes the `sections` configuration into descriptors, preserving input order.
///
/// Entries that cannot be resolved to an element are dropped; normalization never fails.
pub(crate) fn normalize_sections<D: Dom>(
    dom: &D,
    options: &SpyOptions<D::Element>,
) -> Vec<Section<D::Element>> {
    match &options.sections {
        Sections::Selector(selector) => {
            let elements = match dom.query_all(selector) {
                Ok(elements) => elements,
                Err(_) => {
                    spy_warn!(
                        selector = selector.as_str(),
                        "sections selector failed to parse"
                    );
                    Vec::new()
                }
            };
            elements
                .into_iter()
                .map(|el| section_from_element(dom, options, el))
                .collect()
        }
        Sections::Elements(elements) => elements
            .iter()
            .cloned()
            .map(|el| section_from_element(dom, options, el))
            .collect(),
        Sections::List(specs) => specs
            .iter()
            .filter_map(|spec| section_from_spec(dom, options, spec))
            .collect(),
    }
}

fn section_from_element<D: Dom>(
    dom: &D,
    options: &SpyOptions<D::Element>,
    target: D::Element,
) -> Section<D::Element> {
    let apply_to = auto_toc_apply_to(dom, options, &target);
    Section {
        id: dom.element_id(&target),
        enter_class: options.active_class.clone(),
        apply_to,
        target,
        on_enter: None,
        on_leave: None,
        on_update: None,
        active: false,
        top: 0.0,
        bottom: 0.0,
    }
}

fn section_from_spec<D: Dom>(
    dom: &D,
    options: &SpyOptions<D::Element>,
    spec: &SectionSpec<D::Element>,
) -> Option<Section<D::Element>> {
    let target = match &spec.target {
        TargetRef::Element(el) => el.clone(),
        TargetRef::Selector(selector) => match dom.query(selector) {
            Ok(Some(el)) => el,
            Ok(None) => return None,
            Err(_) => {
                spy_warn!(
                    selector = selector.as_str(),
                    "section target selector failed to parse"
                );
                return None;
            }
        },
    };

    let mut apply_to = spec.apply_to.clone();
    merge_apply_to(&mut apply_to, auto_toc_apply_to(dom, options, &target));

    Some(Section {
        id: spec.id.clone().or_else(|| dom.element_id(&target)),
        enter_class: spec
            .enter_class
            .clone()
            .unwrap_or_else(|| options.active_class.clone()),
        apply_to,
        target,
        on_enter: spec.on_enter.clone(),
        on_leave: spec.on_leave.clone(),
        on_update: spec.on_update.clone(),
        active: false,
        top: 0.0,
        bottom: 0.0,
    })
}

/// TOC derivation for one section.
///
/// An explicit `data-scrollspy-toc` attribute on the element wins outright and is honored
/// even when global binding is off. The id-based fallback requires `bind_toc`, a configured
/// `toc_selector`, and an element id.
fn auto_toc_apply_to<D: Dom>(
    dom: &D,
    options: &SpyOptions<D::Element>,
    target: &D::Element,
) -> Vec<ApplyTo<D::Element>> {
    let mut out = Vec::new();

    if let Some(custom) = dom.attribute(target, TOC_ATTRIBUTE) {
        if !custom.is_empty() {
            out.push(ApplyTo::selector(custom, TOC_CURRENT_CLASS));
            return out;
        }
    }

    if !options.bind_toc || options.toc_selector.is_empty() {
        return out;
    }
    let Some(id) = dom.element_id(target) else {
        return out;
    };
    if id.is_empty() {
        return out;
    }

    out.push(ApplyTo::selector(
        format!("{} a[href=\"#{}\"]", options.toc_selector, id),
        TOC_CURRENT_CLASS,
    ));
    out
}

/// Appends auto-derived entries, suppressing ones whose selector and class both match a
/// caller-supplied entry. Caller entries keep list precedence.
fn merge_apply_to<E>(explicit: &mut Vec<ApplyTo<E>>, auto: Vec<ApplyTo<E>>) {
    for candidate in auto {
        let duplicate = explicit.iter().any(|entry| {
            entry.class == candidate.class
                && matches!(
                    (&entry.target, &candidate.target),
                    (ClassTarget::Selector(a), ClassTarget::Selector(b)) if a == b
                )
        });
        if !duplicate {
            explicit.push(candidate);
        }
    }
}
