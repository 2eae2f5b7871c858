use filmstrip::{FetchOutcome, FetchRequest, ImageRecord, SourceError, StripOptions};
use filmstrip_adapter::{Controller, ScrollSurface, SimulatedSurface};

fn fake_page(page: u32, count: usize) -> Result<Vec<ImageRecord>, SourceError> {
    if page == 53 {
        return Err(SourceError::Status(503));
    }
    Ok((0..count)
        .map(|i| ImageRecord::new(format!("{page}-{i}"), format!("https://img.test/{page}/{i}")))
        .collect())
}

fn main() {
    // Example: a user flicking through a carousel, simulated frame by frame.
    //
    // An adapter would:
    // - forward native scroll events to on_scroll(now_ms)
    // - call tick(now_ms, surface) from a frame loop / timer
    // - run returned requests against its image source and feed results to on_fetch_complete
    // - re-render, then call after_commit(surface) before paint
    let options = StripOptions::default().with_batch_size(6).with_max_batches(3);
    let mut c = Controller::new(options).expect("valid options");
    let mut surface = SimulatedSurface::new(240.0, 12.0, 800.0);

    let mut pending: Vec<FetchRequest> = c.mount().into_iter().collect();
    let mut now_ms = 0u64;

    while now_ms < 4_000 {
        now_ms += 16;

        // Fetches resolve one frame after they are issued.
        for req in pending.drain(..) {
            let outcome = c.on_fetch_complete(req, fake_page(req.page, req.count));
            if !matches!(outcome, FetchOutcome::Stale) {
                println!("t={now_ms} {outcome:?}");
            }
        }
        surface.set_len(c.strip().len());
        if let Some(comp) = c.after_commit(&mut surface) {
            println!("t={now_ms} compensated {:.0} -> {:.0}", comp.from, comp.to);
        }

        // The user keeps scrolling towards the trailing edge.
        if now_ms % 400 == 0 {
            surface.scroll_to(surface.scroll_offset() + 900.0);
            c.on_scroll(now_ms);
        }
        pending.extend(c.tick(now_ms, &surface));
    }

    println!(
        "done: offset={:.0} pages={:?} observed={}",
        surface.scroll_offset(),
        c.strip().window().page_span(),
        c.visibility().observed_len()
    );
}
