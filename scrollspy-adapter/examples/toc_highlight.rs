use scrollspy::{Dom, EnterAt, SpyOptions, TOC_CURRENT_CLASS};
use scrollspy_adapter::{Driver, SimDom};

fn main() {
    let dom = SimDom::new(600.0);
    let root = dom.root_element();

    let toc = dom.add_element(root, "nav");
    dom.add_class(&toc, "toc");
    for id in ["intro", "install", "usage"] {
        let link = dom.add_element(toc, "a");
        dom.set_attribute(link, "href", &format!("#{id}"));
    }

    let mut top = 0.0;
    for id in ["intro", "install", "usage"] {
        let section = dom.add_element(root, "section");
        dom.set_id(section, id);
        dom.add_class(&section, "content");
        dom.set_extent(section, top, top + 900.0);
        top += 900.0;
    }

    let mut driver = Driver::new(
        dom.clone(),
        SpyOptions::new()
            .with_section_selector(".content")
            .with_bind_toc(true)
            .with_toc_selector(".toc")
            .with_enter_at(EnterAt::Center),
        0,
    );

    let mut now = 0u64;
    for y in [0.0, 400.0, 800.0, 1300.0, 2000.0, 3000.0] {
        dom.set_scroll_y(y);
        driver.on_scroll(now);
        driver.tick(now);
        now += 16;

        let active = driver
            .spy()
            .active()
            .and_then(|s| s.id())
            .unwrap_or("(none)");
        let current: Vec<String> = dom
            .query_all(".toc a")
            .unwrap()
            .into_iter()
            .filter(|link| dom.has_class(*link, TOC_CURRENT_CLASS))
            .filter_map(|link| dom.attribute(&link, "href"))
            .collect();
        println!("scroll={y:>6} active={active:<8} toc={current:?}");
    }
}
