use alloc::vec::Vec;

use crate::dom::Dom;
use crate::types::{ApplyTo, ClassTarget};

/// Adds or removes every apply-to class.
///
/// Selector entries are re-queried against the live document at call time, so bindings keep
/// working across DOM mutations between activations. A selector that fails to parse matches
/// nothing.
pub(crate) fn apply_targets<D: Dom>(dom: &D, apply_to: &[ApplyTo<D::Element>], active: bool) {
    for entry in apply_to {
        if entry.class.is_empty() {
            continue;
        }
        match &entry.target {
            ClassTarget::Element(element) => toggle(dom, element, &entry.class, active),
            ClassTarget::Selector(selector) => {
                let matches = match dom.query_all(selector) {
                    Ok(matches) => matches,
                    Err(_) => {
                        spy_warn!(
                            selector = selector.as_str(),
                            "apply-to selector failed to parse"
                        );
                        Vec::new()
                    }
                };
                for element in &matches {
                    toggle(dom, element, &entry.class, active);
                }
            }
        }
    }
}

fn toggle<D: Dom>(dom: &D, element: &D::Element, class: &str, active: bool) {
    if active {
        dom.add_class(element, class);
    } else {
        dom.remove_class(element, class);
    }
}
