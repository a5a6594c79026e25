//! The smallest possible host: a fixed two-section page with no selector engine.
//!
//! Shows what a `Dom` implementation owes the engine, and that selector support is optional
//! as long as sections are registered as element handles.

use std::cell::RefCell;
use std::rc::Rc;

use scrollspy::{Dom, ScrollSpy, SectionSpec, SpyOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum El {
    Root,
    Hero,
    Features,
}

#[derive(Clone, Default)]
struct FixedPage {
    state: Rc<RefCell<State>>,
}

#[derive(Default)]
struct State {
    scroll_y: f64,
    classes: Vec<(El, String)>,
}

impl FixedPage {
    fn scroll_to(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    fn classes_of(&self, el: El) -> Vec<String> {
        self.state
            .borrow()
            .classes
            .iter()
            .filter(|(e, _)| *e == el)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

impl Dom for FixedPage {
    type Element = El;
    type Error = &'static str;

    fn query_all(&self, _selector: &str) -> Result<Vec<El>, Self::Error> {
        Err("this host has no selector engine")
    }

    fn root(&self) -> El {
        El::Root
    }

    fn element_id(&self, el: &El) -> Option<String> {
        match el {
            El::Hero => Some("hero".into()),
            El::Features => Some("features".into()),
            El::Root => None,
        }
    }

    fn attribute(&self, _el: &El, _name: &str) -> Option<String> {
        None
    }

    fn add_class(&self, el: &El, class: &str) {
        let mut st = self.state.borrow_mut();
        if !st.classes.iter().any(|(e, c)| e == el && c == class) {
            st.classes.push((*el, class.to_string()));
        }
    }

    fn remove_class(&self, el: &El, class: &str) {
        self.state
            .borrow_mut()
            .classes
            .retain(|(e, c)| e != el || c != class);
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        600.0
    }

    fn bounding_extent(&self, el: &El) -> (f64, f64) {
        let y = self.scroll_y();
        match el {
            El::Root => (0.0 - y, 0.0 - y),
            El::Hero => (0.0 - y, 800.0 - y),
            El::Features => (800.0 - y, 2000.0 - y),
        }
    }
}

fn main() {
    let page = FixedPage::default();
    let sections = vec![
        SectionSpec::element(El::Hero)
            .with_on_enter(|ctx| println!("-> entered {:?} ({:?})", ctx.id, ctx.direction))
            .with_on_leave(|ctx| println!("<- left {:?}", ctx.id)),
        SectionSpec::element(El::Features)
            .with_on_enter(|ctx| println!("-> entered {:?} ({:?})", ctx.id, ctx.direction)),
    ];

    // Throttle mode keeps everything synchronous; no frame loop needed.
    let mut spy = ScrollSpy::new(
        page.clone(),
        SpyOptions::new()
            .with_section_list(sections)
            .with_use_raf(false)
            .with_throttle_ms(0)
            .with_soft_refresh(false),
        0,
    );

    let mut now = 0u64;
    for y in [0.0, 400.0, 1000.0, 2500.0] {
        page.scroll_to(y);
        spy.on_scroll(now);
        now += 16;
        println!(
            "scroll={y:>6} hero={:?} features={:?}",
            page.classes_of(El::Hero),
            page.classes_of(El::Features),
        );
    }
    spy.destroy();
}
