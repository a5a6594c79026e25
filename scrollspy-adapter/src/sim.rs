use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use scrollspy::Dom;

/// Selector-parse failure for [`SimDom`] queries.
///
/// The engine swallows these and treats the query as matching nothing; the type mainly
/// exists so hosts and tests can assert on the failure mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character `{0}` in selector")]
    UnexpectedChar(char),
    #[error("empty identifier after `{0}`")]
    EmptyIdentifier(char),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
    #[error("attribute selector must use the form [name=\"value\"]")]
    MalformedAttribute,
}

/// Handle to an element of a [`SimDom`]. The root element is index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimElement(usize);

struct ElementData {
    tag: String,
    id: Option<String>,
    parent: Option<usize>,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    /// Document-coordinate vertical extent.
    top: f64,
    bottom: f64,
}

struct SimState {
    elements: Vec<ElementData>,
    scroll_y: f64,
    viewport_height: f64,
    /// Every attempted class mutation, in order, e.g. `"add #intro is-active"`.
    log: Vec<String>,
}

/// An in-memory document implementing [`Dom`].
///
/// Cloning shares the underlying document, the way two handles to a real DOM would. The
/// selector engine covers the grammar the scrollspy emits: tag names, `#id`, `.class`,
/// `[attr="value"]` suffixes, and the descendant combinator (whitespace). Attribute values
/// must not contain whitespace.
#[derive(Clone)]
pub struct SimDom {
    state: Rc<RefCell<SimState>>,
}

impl SimDom {
    pub fn new(viewport_height: f64) -> Self {
        let root = ElementData {
            tag: "html".to_string(),
            id: None,
            parent: None,
            attrs: Vec::new(),
            classes: Vec::new(),
            top: 0.0,
            bottom: 0.0,
        };
        Self {
            state: Rc::new(RefCell::new(SimState {
                elements: Vec::from([root]),
                scroll_y: 0.0,
                viewport_height,
                log: Vec::new(),
            })),
        }
    }

    pub fn root_element(&self) -> SimElement {
        SimElement(0)
    }

    pub fn add_element(&self, parent: SimElement, tag: &str) -> SimElement {
        let mut st = self.state.borrow_mut();
        st.elements.push(ElementData {
            tag: tag.to_string(),
            id: None,
            parent: Some(parent.0),
            attrs: Vec::new(),
            classes: Vec::new(),
            top: 0.0,
            bottom: 0.0,
        });
        SimElement(st.elements.len() - 1)
    }

    pub fn set_id(&self, element: SimElement, id: &str) {
        self.state.borrow_mut().elements[element.0].id = Some(id.to_string());
    }

    pub fn set_attribute(&self, element: SimElement, name: &str, value: &str) {
        let mut st = self.state.borrow_mut();
        let attrs = &mut st.elements[element.0].attrs;
        if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Sets the element's document-coordinate vertical extent.
    pub fn set_extent(&self, element: SimElement, top: f64, bottom: f64) {
        let mut st = self.state.borrow_mut();
        st.elements[element.0].top = top;
        st.elements[element.0].bottom = bottom;
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.state.borrow_mut().viewport_height = height;
    }

    pub fn has_class(&self, element: SimElement, class: &str) -> bool {
        self.state.borrow().elements[element.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    pub fn classes(&self, element: SimElement) -> Vec<String> {
        self.state.borrow().elements[element.0].classes.clone()
    }

    /// Every attempted class mutation so far, in order.
    pub fn mutation_log(&self) -> Vec<String> {
        self.state.borrow().log.clone()
    }

    pub fn clear_mutation_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    fn label(st: &SimState, idx: usize) -> String {
        match &st.elements[idx].id {
            Some(id) => format!("#{id}"),
            None => format!("{}:{idx}", st.elements[idx].tag),
        }
    }
}

impl Dom for SimDom {
    type Element = SimElement;
    type Error = SelectorError;

    fn query_all(&self, selector: &str) -> Result<Vec<SimElement>, SelectorError> {
        let chain = parse_selector(selector)?;
        let st = self.state.borrow();
        Ok((0..st.elements.len())
            .filter(|&idx| matches_chain(&st, idx, &chain))
            .map(SimElement)
            .collect())
    }

    fn root(&self) -> SimElement {
        SimElement(0)
    }

    fn element_id(&self, element: &SimElement) -> Option<String> {
        self.state.borrow().elements[element.0]
            .id
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn attribute(&self, element: &SimElement, name: &str) -> Option<String> {
        let st = self.state.borrow();
        attribute_of(&st.elements[element.0], name)
    }

    fn add_class(&self, element: &SimElement, class: &str) {
        let mut st = self.state.borrow_mut();
        let label = Self::label(&st, element.0);
        st.log.push(format!("add {label} {class}"));
        let classes = &mut st.elements[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: &SimElement, class: &str) {
        let mut st = self.state.borrow_mut();
        let label = Self::label(&st, element.0);
        st.log.push(format!("remove {label} {class}"));
        st.elements[element.0].classes.retain(|c| c != class);
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.state.borrow().viewport_height
    }

    fn bounding_extent(&self, element: &SimElement) -> (f64, f64) {
        let st = self.state.borrow();
        let e = &st.elements[element.0];
        (e.top - st.scroll_y, e.bottom - st.scroll_y)
    }
}

#[derive(Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
}

fn parse_selector(input: &str) -> Result<Vec<SimpleSelector>, SelectorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }
    trimmed.split_whitespace().map(parse_compound).collect()
}

fn parse_compound(token: &str) -> Result<SimpleSelector, SelectorError> {
    let mut sel = SimpleSelector::default();
    let bytes = token.as_bytes();
    let mut i = 0;

    if i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        let start = i;
        while i < bytes.len() && is_ident(bytes[i]) {
            i += 1;
        }
        sel.tag = Some(token[start..i].to_string());
    }

    while i < bytes.len() {
        match bytes[i] {
            marker @ (b'#' | b'.') => {
                i += 1;
                let start = i;
                while i < bytes.len() && is_ident(bytes[i]) {
                    i += 1;
                }
                if start == i {
                    return Err(SelectorError::EmptyIdentifier(marker as char));
                }
                let name = token[start..i].to_string();
                if marker == b'#' {
                    sel.id = Some(name);
                } else {
                    sel.classes.push(name);
                }
            }
            b'[' => {
                let Some(end) = token[i..].find(']') else {
                    return Err(SelectorError::UnterminatedAttribute);
                };
                let body = &token[i + 1..i + end];
                let (name, value) = body
                    .split_once('=')
                    .ok_or(SelectorError::MalformedAttribute)?;
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .ok_or(SelectorError::MalformedAttribute)?;
                if name.is_empty() {
                    return Err(SelectorError::MalformedAttribute);
                }
                sel.attrs.push((name.to_string(), value.to_string()));
                i += end + 1;
            }
            other => return Err(SelectorError::UnexpectedChar(other as char)),
        }
    }

    Ok(sel)
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn attribute_of(element: &ElementData, name: &str) -> Option<String> {
    if name == "id" {
        return element.id.clone();
    }
    element
        .attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
}

fn matches_simple(st: &SimState, idx: usize, sel: &SimpleSelector) -> bool {
    let e = &st.elements[idx];
    if let Some(tag) = &sel.tag {
        if e.tag != *tag {
            return false;
        }
    }
    if let Some(id) = &sel.id {
        if e.id.as_deref() != Some(id.as_str()) {
            return false;
        }
    }
    if sel.classes.iter().any(|c| !e.classes.iter().any(|ec| ec == c)) {
        return false;
    }
    sel.attrs
        .iter()
        .all(|(name, value)| attribute_of(e, name).as_deref() == Some(value.as_str()))
}

/// Descendant-combinator match: the last compound must match the element itself, and the
/// remaining compounds must match ancestors bottom-up. Greedy matching is exact for
/// descendant-only chains.
fn matches_chain(st: &SimState, idx: usize, chain: &[SimpleSelector]) -> bool {
    let Some((last, ancestors)) = chain.split_last() else {
        return false;
    };
    if !matches_simple(st, idx, last) {
        return false;
    }

    let mut remaining = ancestors;
    let mut cursor = st.elements[idx].parent;
    while let Some(sel) = remaining.last() {
        let Some(parent) = cursor else {
            return false;
        };
        if matches_simple(st, parent, sel) {
            remaining = &remaining[..remaining.len() - 1];
        }
        cursor = st.elements[parent].parent;
    }
    true
}
