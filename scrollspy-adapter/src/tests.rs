use crate::{Driver, SelectorError, SimDom, SimElement};

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::RefCell;

use scrollspy::{
    Dom, OptionsOverlay, ScrollSpy, SectionContext, SpyOptions, TOC_ATTRIBUTE, TOC_CURRENT_CLASS,
    resolve_options,
};

/// A page with a two-link TOC and two full-height sections.
struct Page {
    dom: SimDom,
    link_intro: SimElement,
    link_usage: SimElement,
    s_intro: SimElement,
    s_usage: SimElement,
}

fn page() -> Page {
    let dom = SimDom::new(600.0);
    let root = dom.root_element();

    let toc = dom.add_element(root, "nav");
    dom.add_class(&toc, "toc");
    let link_intro = dom.add_element(toc, "a");
    dom.set_attribute(link_intro, "href", "#intro");
    let link_usage = dom.add_element(toc, "a");
    dom.set_attribute(link_usage, "href", "#usage");

    let s_intro = dom.add_element(root, "section");
    dom.set_id(s_intro, "intro");
    dom.add_class(&s_intro, "js-section");
    dom.set_extent(s_intro, 0.0, 800.0);

    let s_usage = dom.add_element(root, "section");
    dom.set_id(s_usage, "usage");
    dom.add_class(&s_usage, "js-section");
    dom.set_extent(s_usage, 800.0, 1600.0);

    dom.clear_mutation_log();
    Page {
        dom,
        link_intro,
        link_usage,
        s_intro,
        s_usage,
    }
}

fn toc_options() -> SpyOptions<SimElement> {
    SpyOptions::new()
        .with_section_selector(".js-section")
        .with_bind_toc(true)
        .with_toc_selector(".toc")
        .with_soft_refresh(false)
}

#[test]
fn selector_parse_errors() {
    let dom = SimDom::new(600.0);
    assert_eq!(dom.query_all(""), Err(SelectorError::Empty));
    assert_eq!(
        dom.query_all(".toc a[href='#x']"),
        Err(SelectorError::MalformedAttribute)
    );
    assert_eq!(
        dom.query_all("a[href"),
        Err(SelectorError::UnterminatedAttribute)
    );
    assert_eq!(dom.query_all(".#x"), Err(SelectorError::EmptyIdentifier('.')));
    assert_eq!(dom.query_all("a!b"), Err(SelectorError::UnexpectedChar('!')));
    assert_eq!(SelectorError::Empty.to_string(), "empty selector");
}

#[test]
fn descendant_selector_matching() {
    let page = page();
    let dom = &page.dom;

    assert_eq!(
        dom.query_all(".toc a[href=\"#intro\"]").unwrap(),
        Vec::from([page.link_intro])
    );
    assert_eq!(dom.query_all("a").unwrap().len(), 2);
    assert_eq!(
        dom.query_all("#intro").unwrap(),
        Vec::from([page.s_intro])
    );
    assert_eq!(dom.query_all("section.js-section").unwrap().len(), 2);
    // Descendant chains only match through ancestry.
    assert!(dom.query_all(".js-section a").unwrap().is_empty());
}

#[test]
fn toc_highlight_end_to_end() {
    let page = page();
    let dom = page.dom.clone();
    let mut driver = Driver::new(dom.clone(), toc_options(), 0);

    assert!(driver.tick(0));
    assert!(dom.has_class(page.s_intro, "is-active"));
    assert!(dom.has_class(page.link_intro, TOC_CURRENT_CLASS));
    assert!(!dom.has_class(page.link_usage, TOC_CURRENT_CLASS));

    dom.set_scroll_y(900.0);
    driver.on_scroll(16);
    assert!(driver.tick(16));

    assert!(!dom.has_class(page.s_intro, "is-active"));
    assert!(!dom.has_class(page.link_intro, TOC_CURRENT_CLASS));
    assert!(dom.has_class(page.s_usage, "is-active"));
    assert!(dom.has_class(page.link_usage, TOC_CURRENT_CLASS));
}

#[test]
fn selector_rebinding_sees_links_added_after_construction() {
    let page = page();
    let dom = page.dom.clone();
    let mut driver = Driver::new(dom.clone(), toc_options(), 0);
    driver.tick(0);
    assert!(dom.has_class(page.link_intro, TOC_CURRENT_CLASS));

    // The TOC grows while the section is active; the new link is picked up on the next
    // toggle because selectors are re-resolved at call time.
    let toc = dom.query_all(".toc").unwrap()[0];
    let late_link = dom.add_element(toc, "a");
    dom.set_attribute(late_link, "href", "#intro");

    dom.set_scroll_y(900.0);
    driver.on_scroll(16);
    driver.tick(16);
    assert!(!dom.has_class(page.link_intro, TOC_CURRENT_CLASS));
    assert!(!dom.has_class(late_link, TOC_CURRENT_CLASS));

    dom.set_scroll_y(100.0);
    driver.on_scroll(32);
    driver.tick(32);
    assert!(dom.has_class(page.link_intro, TOC_CURRENT_CLASS));
    assert!(dom.has_class(late_link, TOC_CURRENT_CLASS));
}

#[test]
fn malformed_toc_attribute_degrades_to_no_binding() {
    let page = page();
    let dom = page.dom.clone();
    // Unquoted attribute value: parses as a malformed selector at apply time.
    dom.set_attribute(page.s_intro, TOC_ATTRIBUTE, ".toc a[href=#intro]");

    let mut driver = Driver::new(dom.clone(), toc_options(), 0);
    driver.tick(0);

    assert!(dom.has_class(page.s_intro, "is-active"));
    assert!(!dom.has_class(page.link_intro, TOC_CURRENT_CLASS));
    assert!(
        dom.mutation_log()
            .iter()
            .all(|op| !op.contains(TOC_CURRENT_CLASS))
    );
}

#[test]
fn driver_grants_one_frame_per_tick() {
    let page = page();
    let dom = page.dom.clone();
    let updates = Rc::new(RefCell::new(0usize));
    let updates_cb = Rc::clone(&updates);
    let mut driver = Driver::new(
        dom.clone(),
        toc_options().with_on_update(Some(move |_ctx: &SectionContext<SimElement>| {
            *updates_cb.borrow_mut() += 1;
        })),
        0,
    );
    driver.tick(0);

    // A burst of scrolls inside the same section collapses into one run.
    dom.set_scroll_y(100.0);
    driver.on_scroll(5);
    dom.set_scroll_y(200.0);
    driver.on_scroll(8);
    dom.set_scroll_y(300.0);
    driver.on_scroll(11);
    assert!(driver.tick(16));
    assert_eq!(*updates.borrow(), 1);
    assert!(!driver.tick(17));
    assert_eq!(*updates.borrow(), 1);
}

#[test]
fn direction_and_progress_follow_scroll() {
    let page = page();
    let dom = page.dom.clone();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    let mut driver = Driver::new(
        dom.clone(),
        toc_options().with_on_update(Some(move |ctx: &SectionContext<SimElement>| {
            seen_cb
                .borrow_mut()
                .push((ctx.direction.as_str(), ctx.progress));
        })),
        0,
    );
    driver.tick(0);

    for (now, y) in [(16u64, 100.0), (32, 150.0), (48, 120.0)] {
        dom.set_scroll_y(y);
        driver.on_scroll(now);
        driver.tick(now);
    }

    let seen = seen.borrow();
    assert_eq!(seen[0], ("down", 0.125));
    assert_eq!(seen[1], ("down", 0.1875));
    assert_eq!(seen[2], ("up", 0.15));
}

#[test]
fn soft_refresh_absorbs_late_layout() {
    let dom = SimDom::new(600.0);
    let root = dom.root_element();
    let section = dom.add_element(root, "section");
    dom.set_id(section, "late");
    dom.add_class(&section, "js-section");
    // Not laid out yet: zero-height extent, nothing can activate.

    let mut driver = Driver::new(
        dom.clone(),
        SpyOptions::new()
            .with_section_selector(".js-section")
            .with_soft_refresh(true)
            .with_soft_refresh_delay_ms(400),
        0,
    );
    driver.tick(0);
    assert!(driver.spy().active().is_none());

    // Images finish loading and the section gains height.
    dom.set_extent(section, 0.0, 900.0);
    assert!(!driver.tick(200));
    assert!(driver.spy().active().is_none());

    // The soft refresh re-reads geometry and the queued frame runs in the same tick.
    assert!(driver.tick(450));
    assert!(dom.has_class(section, "is-active"));

    // Fire-once.
    dom.set_extent(section, 5000.0, 6000.0);
    assert!(!driver.tick(900));
    assert_eq!(driver.spy().sections()[0].extent(), (0.0, 900.0));
}

#[test]
fn viewport_resize_moves_a_centered_line() {
    let page = page();
    let dom = page.dom.clone();
    let mut driver = Driver::new(
        dom.clone(),
        toc_options().with_enter_at(scrollspy::EnterAt::Center),
        0,
    );
    dom.set_scroll_y(500.0);
    driver.on_scroll(0);
    driver.tick(0);
    // line = 500 + 600/2 = 800, first pixel of the usage section.
    assert!(dom.has_class(page.s_usage, "is-active"));
    assert_eq!(dom.classes(page.s_usage), ["js-section", "is-active"]);

    dom.set_viewport_height(400.0);
    driver.on_resize(16);
    driver.tick(16);
    // line = 500 + 400/2 = 700, back inside intro.
    assert!(dom.has_class(page.s_intro, "is-active"));
    assert!(!dom.has_class(page.s_usage, "is-active"));
}

#[test]
fn pause_and_resume_through_the_spy() {
    let page = page();
    let dom = page.dom.clone();
    let mut driver = Driver::new(dom.clone(), toc_options(), 0);
    driver.tick(0);
    assert!(dom.has_class(page.s_intro, "is-active"));

    driver.spy_mut().pause();
    dom.set_scroll_y(900.0);
    driver.on_scroll(16);
    assert!(!driver.tick(16));
    assert!(dom.has_class(page.s_intro, "is-active"));

    driver.spy_mut().resume(32);
    assert!(driver.tick(32));
    assert!(dom.has_class(page.s_usage, "is-active"));
    assert!(!dom.has_class(page.s_intro, "is-active"));
}

#[test]
fn destroy_detaches_and_clears() {
    let page = page();
    let dom = page.dom.clone();
    let mut driver = Driver::new(
        dom.clone(),
        toc_options().with_root_class("scrollspy-enabled"),
        0,
    );
    driver.tick(0);
    assert!(dom.has_class(dom.root_element(), "scrollspy-enabled"));

    driver.spy_mut().destroy();
    assert!(!dom.has_class(dom.root_element(), "scrollspy-enabled"));
    assert!(!dom.has_class(page.s_intro, "is-active"));
    assert!(!dom.has_class(page.link_intro, TOC_CURRENT_CLASS));

    dom.clear_mutation_log();
    dom.set_scroll_y(900.0);
    driver.on_scroll(16);
    assert!(!driver.tick(16));
    assert!(dom.mutation_log().is_empty());
}

#[test]
fn overlay_overrides_builder_configuration() {
    let page = page();
    let dom = page.dom.clone();
    let overlay = OptionsOverlay {
        active_class: Some("now-reading".to_string()),
        use_raf: Some(false),
        throttle_ms: Some(0),
        ..OptionsOverlay::default()
    };
    let options = resolve_options(toc_options().with_active_class("builder"), Some(&overlay));

    dom.set_scroll_y(100.0);
    let spy = ScrollSpy::new(dom.clone(), options, 0);
    assert!(dom.has_class(page.s_intro, "now-reading"));
    assert!(!dom.has_class(page.s_intro, "builder"));
    assert!(spy.active().is_some());
}
