use filmstrip::{Edge, ImageRecord, StripOptions};
use filmstrip_adapter::{Controller, ScrollSurface, SimulatedSurface};

fn main() {
    // Example: loading older images at the leading edge without a visual jump.
    //
    // The flow is:
    // 1) apply the fetched page (the window now starts with the new batch)
    // 2) lay out the new window
    // 3) after_commit shifts the scroll offset by the prepended block before paint
    let mut c = Controller::new(StripOptions::default()).expect("valid options");
    let mut surface = SimulatedSurface::new(300.0, 16.0, 900.0);

    let req = c.mount().expect("first mount issues a request");
    c.on_fetch_complete(req, Ok(records(req.page, req.count)));
    surface.set_len(c.strip().len());
    c.after_commit(&mut surface);

    let anchor = c.strip().window().first().map(|it| it.key);
    println!("before: offset={} first={anchor:?}", surface.scroll_offset());

    let req = c.request_more(Edge::Leading).expect("leading edge idle");
    c.on_fetch_complete(req, Ok(records(req.page, req.count)));
    surface.set_len(c.strip().len());
    let comp = c.after_commit(&mut surface);

    let index = anchor.and_then(|k| c.strip().window().index_of(k));
    println!(
        "after: {comp:?} offset={} anchor_index={index:?} anchor_start={:?}",
        surface.scroll_offset(),
        index.map(|i| surface.item_start(i))
    );
}

fn records(page: u32, count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| ImageRecord::new(format!("{page}-{i}"), format!("https://img.test/{page}/{i}")))
        .collect()
}
