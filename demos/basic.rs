// Example: driving the engine by hand with a fixed-size layout.
use filmstrip::{Edge, FixedSpan, ImageRecord, InfiniteStrip, ScrollMetrics, StripOptions};

fn fake_page(page: u32, count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| ImageRecord::new(format!("{page}-{i}"), format!("https://img.test/{page}/{i}")))
        .collect()
}

fn main() {
    let options = StripOptions::default().with_batch_size(5).with_max_batches(3);
    let mut strip = InfiniteStrip::new(options).expect("valid options");

    let req = strip.mount().expect("first mount issues a request");
    strip.complete(req, Ok(fake_page(req.page, req.count)));
    println!("loaded: len={} pages={:?}", strip.len(), strip.window().page_span());

    // Grow towards the trailing edge until the window starts evicting.
    for _ in 0..3 {
        let req = strip.request_more(Edge::Trailing).expect("trailing edge idle");
        let outcome = strip.complete(req, Ok(fake_page(req.page, req.count)));
        println!("{outcome:?} pages={:?}", strip.window().page_span());
    }

    // Layout after the last render: 120px tiles, 8px gaps, 600px viewport.
    let layout = FixedSpan::new(120.0, 8.0, strip.len());
    let max_offset = layout.total() - 600.0;
    if let Some(c) = strip.compensate(max_offset, &layout) {
        println!("compensated: {} -> {} ({} adjustments)", c.from, c.to, c.applied);
    }
    strip.finish_compensation();

    // A scroll burst near the leading edge, evaluated once after the quiet period.
    strip.notify_scroll_event(0);
    strip.notify_scroll_event(30);
    let metrics = ScrollMetrics {
        offset: 10.0,
        max_offset,
    };
    let deadline = strip.scroll_deadline_ms().unwrap_or_default();
    let req = strip.poll_scroll(deadline, metrics, &layout);
    println!("after scroll: direction={:?} request={req:?}", strip.scroll_direction());

    for item in strip.items().take(3) {
        println!("  {}", item.dom_key());
    }
}
