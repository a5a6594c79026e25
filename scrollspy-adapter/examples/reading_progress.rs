use scrollspy::{SectionSpec, SpyOptions};
use scrollspy_adapter::{Driver, SimDom};

fn main() {
    let dom = SimDom::new(600.0);
    let root = dom.root_element();
    let article = dom.add_element(root, "article");
    dom.set_id(article, "story");
    dom.set_extent(article, 0.0, 4000.0);

    let spec = SectionSpec::element(article)
        .with_on_enter(|ctx| println!("enter {:?} at line {}", ctx.id, ctx.line))
        .with_on_leave(|ctx| println!("leave {:?}", ctx.id))
        .with_on_update(|ctx| {
            let pct = (ctx.progress * 100.0).clamp(0.0, 100.0);
            println!("reading {:>5.1}% (dir {})", pct, ctx.direction.as_str());
        });

    let mut driver = Driver::new(
        dom.clone(),
        SpyOptions::new()
            .with_section_list(vec![spec])
            .with_offset(64.0) // sticky header
            .with_soft_refresh(false),
        0,
    );

    let mut now = 0u64;
    for y in [0.0, 600.0, 1200.0, 2400.0, 3600.0, 4200.0] {
        dom.set_scroll_y(y);
        driver.on_scroll(now);
        driver.tick(now);
        now += 16;
    }
}
