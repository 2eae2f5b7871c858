use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn page(page: u32, count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| ImageRecord::new(format!("{page}-{i}"), format!("https://img/{page}/{i}.jpg")))
        .collect()
}

fn ready_strip(options: StripOptions) -> InfiniteStrip {
    let mut s = InfiniteStrip::new(options).unwrap();
    let req = s.mount().unwrap();
    let n = options.batch_size;
    assert_eq!(s.complete(req, Ok(page(req.page, n))), FetchOutcome::Loaded { count: n });
    s
}

fn extend(s: &mut InfiniteStrip, edge: Edge) -> FetchOutcome {
    let req = s.request_more(edge).unwrap();
    let n = s.options().batch_size;
    s.complete(req, Ok(page(req.page, n)))
}

fn ids(s: &InfiniteStrip) -> Vec<String> {
    s.items().map(|it| it.id.clone()).collect()
}

fn assert_unique_keys(s: &InfiniteStrip) {
    let mut seen = HashSet::new();
    for it in s.items() {
        assert!(seen.insert(it.key), "duplicate render key {:?}", it.key);
    }
    let dom: HashSet<String> = s.items().map(Item::dom_key).collect();
    assert_eq!(dom.len(), s.len());
}

#[test]
fn default_options_match_carousel_defaults() {
    let o = StripOptions::default();
    assert_eq!(o.batch_size, 10);
    assert_eq!(o.max_batches, 6);
    assert_eq!(o.max_items(), 60);
    assert_eq!(o.initial_page, 50);
    assert_eq!(o.debounce_ms, 80);
    assert_eq!(o.prefetch_items, 2);
    assert_eq!(o.lazy_margin, 200.0);
    assert_eq!(o.validate(), Ok(()));
}

#[test]
fn invalid_options_are_rejected() {
    let bad = StripOptions::new().with_batch_size(0);
    assert_eq!(InfiniteStrip::new(bad).unwrap_err(), OptionsError::ZeroBatchSize);
    let bad = StripOptions::new().with_max_batches(0);
    assert_eq!(bad.validate(), Err(OptionsError::ZeroMaxBatches));
    let bad = StripOptions::new().with_initial_page(0);
    assert_eq!(bad.validate(), Err(OptionsError::ZeroInitialPage));
    let bad = StripOptions::new().with_prefetch_items(0);
    assert_eq!(bad.validate(), Err(OptionsError::ZeroPrefetchItems));
}

#[test]
fn mount_loads_initial_page_in_order() {
    let mut s = InfiniteStrip::new(StripOptions::default()).unwrap();
    assert!(!s.is_loading());

    let req = s.mount().unwrap();
    assert_eq!(req.purpose, FetchPurpose::Initial);
    assert_eq!(req.page, 50);
    assert_eq!(req.count, 10);
    assert!(s.is_loading());
    assert!(s.mount().is_none());

    // Nothing extends while loading.
    assert!(s.request_more(Edge::Trailing).is_none());
    assert!(!s.notify_scroll_event(0));

    let out = s.complete(req, Ok(page(50, 10)));
    assert_eq!(out, FetchOutcome::Loaded { count: 10 });
    assert!(!s.is_loading());
    assert!(s.is_ready());
    assert_eq!(
        ids(&s),
        (0..10).map(|i| format!("50-{i}")).collect::<Vec<_>>()
    );
    assert!(s.items().all(|it| it.source_page == 50));
    assert_eq!(s.cursor(Edge::Trailing), 51);
    assert_eq!(s.cursor(Edge::Leading), 49);
    assert!(!s.has_pending_adjustment());
}

#[test]
fn initial_page_renders_exactly_what_the_source_returns() {
    let mut s = InfiniteStrip::new(StripOptions::default()).unwrap();
    let req = s.mount().unwrap();
    assert_eq!(s.complete(req, Ok(page(999, 7))), FetchOutcome::Loaded { count: 7 });
    assert_eq!(s.len(), 7);
}

#[test]
fn initial_failure_is_reported_and_mount_can_retry() {
    let mut s = InfiniteStrip::new(StripOptions::default()).unwrap();
    let req = s.mount().unwrap();
    let out = s.complete(req, Err(SourceError::Status(401)));
    assert_eq!(
        out,
        FetchOutcome::Failed {
            purpose: FetchPurpose::Initial,
            error: SourceError::Status(401),
        }
    );
    assert_eq!(s.load_state(), &LoadState::Failed(SourceError::Status(401)));
    assert!(!s.is_loading());
    assert!(s.is_empty());

    let retry = s.mount().unwrap();
    assert_ne!(retry.ticket, req.ticket);
    assert_eq!(retry.page, 50);
    // The first request can no longer complete.
    assert_eq!(s.complete(req, Ok(page(50, 10))), FetchOutcome::Stale);
    assert_eq!(s.complete(retry, Ok(page(50, 10))), FetchOutcome::Loaded { count: 10 });
}

#[test]
fn trailing_fetch_appends_without_adjustment() {
    let mut s = ready_strip(StripOptions::default());
    let req = s.request_more(Edge::Trailing).unwrap();
    assert_eq!(req.page, 51);
    assert_eq!(req.purpose, FetchPurpose::Extend(Edge::Trailing));

    let out = s.complete(req, Ok(page(51, 10)));
    assert_eq!(
        out,
        FetchOutcome::Extended {
            edge: Edge::Trailing,
            added: 10,
            removed: 0,
        }
    );
    assert_eq!(s.len(), 20);
    assert_eq!(s.cursor(Edge::Trailing), 52);
    assert_eq!(s.cursor(Edge::Leading), 49);
    assert_eq!(s.items().last().unwrap().id, "51-9");
    assert!(!s.has_pending_adjustment());
    assert!(s.compensate(500.0, &FixedSpan::new(100.0, 0.0, 20)).is_none());
}

#[test]
fn trailing_growth_past_capacity_prunes_leading_batch_and_compensates() {
    let mut s = ready_strip(StripOptions::default());
    for _ in 0..5 {
        extend(&mut s, Edge::Trailing);
    }
    assert_eq!(s.len(), 60);
    assert!(!s.has_pending_adjustment());

    let out = extend(&mut s, Edge::Trailing);
    assert_eq!(
        out,
        FetchOutcome::Extended {
            edge: Edge::Trailing,
            added: 10,
            removed: 10,
        }
    );
    assert_eq!(s.len(), 60);
    assert_eq!(s.items().next().unwrap().source_page, 51);
    assert_eq!(s.items().last().unwrap().source_page, 56);
    assert_eq!(s.cursor(Edge::Trailing), 57);

    let adj = s.pending_adjustment().unwrap();
    assert_eq!(adj.edge, Edge::Trailing);
    assert!(adj.pruned);

    // 10 items of 100px with 16px gaps: 10 * 100 + 9 * 16 = 1144, plus the gap before the rest.
    let m = FixedSpan::new(100.0, 16.0, s.len());
    let c = s.compensate(5000.0, &m).unwrap();
    assert_eq!(c.delta(), -1160.0);
    assert_eq!(c.to, 3840.0);
    assert_eq!(c.applied, 1);
    assert_eq!(s.last_scroll_offset(), 3840.0);
    assert!(!s.has_pending_adjustment());
}

#[test]
fn leading_fetch_prepends_and_compensates_by_new_block() {
    let mut s = ready_strip(StripOptions::default());
    let req = s.request_more(Edge::Leading).unwrap();
    assert_eq!(req.page, 49);

    let out = s.complete(req, Ok(page(49, 10)));
    assert_eq!(
        out,
        FetchOutcome::Extended {
            edge: Edge::Leading,
            added: 10,
            removed: 0,
        }
    );
    assert_eq!(s.len(), 20);
    assert_eq!(s.cursor(Edge::Leading), 48);
    assert_eq!(s.items().next().unwrap().id, "49-0");
    assert_eq!(s.items().nth(10).unwrap().id, "50-0");

    let adj = s.pending_adjustment().unwrap();
    assert_eq!(adj.edge, Edge::Leading);
    assert!(!adj.pruned);

    // Without gaps the shift is exactly the span of the new block.
    let m = FixedSpan::new(300.0, 0.0, s.len());
    let c = s.compensate(40.0, &m).unwrap();
    assert_eq!(c.delta(), m.span_of(Edge::Leading, 10));
    assert_eq!(c.to, 3040.0);
}

#[test]
fn prepend_keeps_previous_leftmost_item_in_place() {
    let mut s = ready_strip(StripOptions::default());
    let gap = 16.0;
    let before = ItemRects::from_sizes(0.0, &[300.0; 10], gap);
    let offset = 120.0;
    let leftmost_start = before.extents()[0].start;
    let visible_before = leftmost_start - offset;

    extend(&mut s, Edge::Leading);
    let after = ItemRects::from_sizes(0.0, &[300.0; 20], gap);
    let c = s.compensate(offset, &after).unwrap();

    // The old first item now sits at index 10.
    let visible_after = after.extents()[10].start - c.to;
    assert_eq!(visible_after, visible_before);
}

#[test]
fn leading_growth_past_capacity_prunes_trailing_batch() {
    let mut s = ready_strip(StripOptions::default().with_max_batches(2));
    extend(&mut s, Edge::Trailing);
    assert_eq!(s.len(), 20);

    let out = extend(&mut s, Edge::Leading);
    assert_eq!(
        out,
        FetchOutcome::Extended {
            edge: Edge::Leading,
            added: 10,
            removed: 10,
        }
    );
    assert_eq!(s.len(), 20);
    assert_eq!(s.items().next().unwrap().source_page, 49);
    assert_eq!(s.items().last().unwrap().source_page, 50);

    let adj = s.pending_adjustment().unwrap();
    assert_eq!((adj.edge, adj.pruned), (Edge::Leading, true));
    let c = s.compensate(0.0, &FixedSpan::new(10.0, 0.0, 20)).unwrap();
    assert_eq!(c.to, 100.0);
}

#[test]
fn leading_cursor_clamps_at_page_one() {
    let mut s = ready_strip(StripOptions::default().with_initial_page(3));
    assert_eq!(s.cursor(Edge::Leading), 2);

    let mut requested = Vec::new();
    for _ in 0..4 {
        let req = s.request_more(Edge::Leading).unwrap();
        requested.push(req.page);
        s.complete(req, Ok(page(req.page, 10)));
        s.compensate(0.0, &FixedSpan::default());
        s.finish_compensation();
    }
    assert_eq!(requested, [2, 1, 1, 1]);
    assert_eq!(s.cursor(Edge::Leading), 1);
    assert_unique_keys(&s);
}

#[test]
fn initial_page_one_starts_leading_cursor_at_one() {
    let s = InfiniteStrip::new(StripOptions::default().with_initial_page(1)).unwrap();
    assert_eq!(s.cursor(Edge::Leading), 1);
    assert_eq!(s.cursor(Edge::Trailing), 2);
}

#[test]
fn single_flight_per_edge() {
    let mut s = ready_strip(StripOptions::default());
    let trailing = s.request_more(Edge::Trailing).unwrap();
    assert!(s.request_more(Edge::Trailing).is_none());
    assert!(s.is_fetching(Edge::Trailing));

    // The opposite edge is not blocked.
    let leading = s.request_more(Edge::Leading).unwrap();
    assert!(s.request_more(Edge::Leading).is_none());

    // Completions apply in resolution order.
    s.complete(leading, Ok(page(leading.page, 10)));
    assert!(!s.is_fetching(Edge::Leading));
    assert!(s.is_fetching(Edge::Trailing));
    s.complete(trailing, Ok(page(trailing.page, 10)));
    assert!(!s.is_fetching(Edge::Trailing));

    assert_eq!(s.len(), 30);
    assert_eq!(s.items().next().unwrap().source_page, 49);
    assert_eq!(s.items().last().unwrap().source_page, 51);

    // A duplicated completion is ignored.
    assert_eq!(s.complete(trailing, Ok(page(51, 10))), FetchOutcome::Stale);
    assert_eq!(s.len(), 30);
}

#[test]
fn failed_fetch_releases_lock_and_keeps_state() {
    let mut s = ready_strip(StripOptions::default());
    let before = ids(&s);
    let req = s.request_more(Edge::Trailing).unwrap();
    let out = s.complete(req, Err(SourceError::Transport("reset".into())));
    assert_eq!(
        out,
        FetchOutcome::Failed {
            purpose: FetchPurpose::Extend(Edge::Trailing),
            error: SourceError::Transport("reset".into()),
        }
    );
    assert_eq!(ids(&s), before);
    assert_eq!(s.cursor(Edge::Trailing), 51);
    assert!(!s.is_fetching(Edge::Trailing));
    assert!(!s.has_pending_adjustment());

    let again = s.request_more(Edge::Trailing).unwrap();
    assert_eq!(again.page, 51);
}

#[test]
fn unmount_abandons_in_flight_fetches() {
    let mut s = ready_strip(StripOptions::default());
    let req = s.request_more(Edge::Trailing).unwrap();
    assert!(s.notify_scroll_event(0));
    s.unmount();

    assert!(!s.is_mounted());
    assert_eq!(s.scroll_deadline_ms(), None);
    assert_eq!(s.complete(req, Ok(page(51, 10))), FetchOutcome::Stale);
    assert!(s.is_empty());
    assert!(s.request_more(Edge::Trailing).is_none());
    assert!(!s.notify_scroll_event(10));

    // A new mount starts over.
    let req = s.mount().unwrap();
    assert_eq!(req.page, 50);
    s.complete(req, Ok(page(50, 10)));
    assert_eq!(s.cursor(Edge::Trailing), 51);
}

#[test]
fn unmount_during_initial_load_drops_the_result() {
    let mut s = InfiniteStrip::new(StripOptions::default()).unwrap();
    let req = s.mount().unwrap();
    s.unmount();
    assert_eq!(s.complete(req, Ok(page(50, 10))), FetchOutcome::Stale);
    assert!(s.is_empty());
    assert_eq!(s.load_state(), &LoadState::Idle);
}

#[test]
fn oversized_page_is_cut_to_batch_size() {
    let mut s = ready_strip(StripOptions::default().with_max_batches(1));
    let req = s.request_more(Edge::Trailing).unwrap();
    let out = s.complete(req, Ok(page(51, 25)));
    assert_eq!(
        out,
        FetchOutcome::Extended {
            edge: Edge::Trailing,
            added: 10,
            removed: 10,
        }
    );
    assert_eq!(s.len(), 10);
    assert!(s.items().all(|it| it.source_page == 51));
}

#[test]
fn render_keys_are_unique_even_for_repeated_ids() {
    let mut s = InfiniteStrip::new(StripOptions::default()).unwrap();
    let req = s.mount().unwrap();
    let same = || -> Vec<ImageRecord> {
        (0..10)
            .map(|i| ImageRecord::new(format!("dup-{i}"), "https://img/x.jpg"))
            .collect()
    };
    s.complete(req, Ok(same()));
    let req = s.request_more(Edge::Trailing).unwrap();
    s.complete(req, Ok(same()));
    let req = s.request_more(Edge::Leading).unwrap();
    s.complete(req, Ok(same()));

    assert_eq!(s.len(), 30);
    assert_unique_keys(&s);
    let first = s.items().next().unwrap();
    assert!(first.dom_key().starts_with("dup-0-p49-"));
}

#[test]
fn debounced_scroll_evaluates_once_per_quiet_period() {
    let mut s = ready_strip(StripOptions::default());
    let m = FixedSpan::new(300.0, 16.0, s.len());
    let near_end = ScrollMetrics {
        offset: 2600.0,
        max_offset: 2800.0,
    };

    for t in [0u64, 20, 40, 60] {
        assert!(s.notify_scroll_event(t));
    }
    assert_eq!(s.scroll_deadline_ms(), Some(140));
    assert!(s.poll_scroll(100, near_end, &m).is_none());

    let req = s.poll_scroll(140, near_end, &m).unwrap();
    assert_eq!(req.purpose, FetchPurpose::Extend(Edge::Trailing));
    assert_eq!(req.page, 51);
    assert_eq!(s.scroll_direction(), Some(Edge::Trailing));

    // Fired once; nothing pending until the next event.
    assert!(s.poll_scroll(500, near_end, &m).is_none());
}

#[test]
fn scroll_far_from_edges_does_not_fetch() {
    let mut s = ready_strip(StripOptions::default());
    let m = FixedSpan::new(300.0, 16.0, s.len());
    let mid = ScrollMetrics {
        offset: 1200.0,
        max_offset: 2800.0,
    };
    assert!(s.evaluate_scroll(mid, &m).is_none());
    assert_eq!(s.scroll_direction(), Some(Edge::Trailing));

    let back = ScrollMetrics {
        offset: 1000.0,
        max_offset: 2800.0,
    };
    assert!(s.evaluate_scroll(back, &m).is_none());
    assert_eq!(s.scroll_direction(), Some(Edge::Leading));
}

#[test]
fn scroll_towards_leading_edge_within_threshold_fetches_leading() {
    let mut s = ready_strip(StripOptions::default());
    let m = FixedSpan::new(300.0, 16.0, s.len());
    s.evaluate_scroll(
        ScrollMetrics {
            offset: 1000.0,
            max_offset: 2800.0,
        },
        &m,
    );
    // Two items: 300 + 16 + 300 = 616.
    let req = s
        .evaluate_scroll(
            ScrollMetrics {
                offset: 616.0,
                max_offset: 2800.0,
            },
            &m,
        )
        .unwrap();
    assert_eq!(req.purpose, FetchPurpose::Extend(Edge::Leading));
    assert_eq!(req.page, 49);
}

#[test]
fn unchanged_offset_counts_as_leading() {
    let mut s = ready_strip(StripOptions::default());
    let m = FixedSpan::new(300.0, 0.0, s.len());
    let at_start = ScrollMetrics {
        offset: 0.0,
        max_offset: 2700.0,
    };
    let req = s.evaluate_scroll(at_start, &m).unwrap();
    assert_eq!(req.purpose, FetchPurpose::Extend(Edge::Leading));
}

#[test]
fn zero_threshold_still_triggers_at_the_edge() {
    let mut s = ready_strip(StripOptions::default());
    let nothing = ItemRects::new();
    let at_end = ScrollMetrics {
        offset: 900.0,
        max_offset: 900.0,
    };
    let req = s.evaluate_scroll(at_end, &nothing).unwrap();
    assert_eq!(req.purpose, FetchPurpose::Extend(Edge::Trailing));
}

#[test]
fn scroll_events_are_ignored_while_compensating() {
    let mut s = ready_strip(StripOptions::default());
    extend(&mut s, Edge::Leading);
    let c = s.compensate(0.0, &FixedSpan::new(100.0, 0.0, s.len())).unwrap();
    assert_eq!(c.to, 1000.0);
    assert!(s.is_compensating());

    // The correction itself must not read as a user scroll.
    assert!(!s.notify_scroll_event(5));
    assert_eq!(s.scroll_deadline_ms(), None);

    s.finish_compensation();
    assert!(s.notify_scroll_event(6));

    // Compensation recorded the corrected offset, so staying put is not "trailing".
    let m = FixedSpan::new(100.0, 0.0, s.len());
    s.evaluate_scroll(
        ScrollMetrics {
            offset: 1000.0,
            max_offset: 5000.0,
        },
        &m,
    );
    assert_eq!(s.scroll_direction(), Some(Edge::Leading));
}

#[test]
fn compensation_never_goes_negative() {
    let mut s = ready_strip(StripOptions::default().with_max_batches(1));
    extend(&mut s, Edge::Trailing);
    let c = s.compensate(50.0, &FixedSpan::new(100.0, 0.0, s.len())).unwrap();
    assert_eq!(c.to, 0.0);
}

#[test]
fn both_edges_resolving_before_one_commit_fold_into_one_correction() {
    let mut s = ready_strip(StripOptions::default().with_max_batches(2));
    extend(&mut s, Edge::Trailing);
    s.compensate(0.0, &FixedSpan::default());
    s.finish_compensation();

    // Leading prepend, then trailing growth evicts that same leading batch.
    let leading = s.request_more(Edge::Leading).unwrap();
    let trailing = s.request_more(Edge::Trailing).unwrap();
    s.complete(leading, Ok(page(leading.page, 10)));
    s.complete(trailing, Ok(page(trailing.page, 10)));
    assert_eq!(s.len(), 20);

    let m = FixedSpan::new(100.0, 0.0, s.len());
    let c = s.compensate(700.0, &m).unwrap();
    assert_eq!(c.applied, 2);
    assert_eq!(c.to, 700.0);
}

#[test]
fn folded_prepends_of_different_widths_keep_the_old_leftmost_item() {
    let mut s = ready_strip(StripOptions::default());
    extend(&mut s, Edge::Leading);
    extend(&mut s, Edge::Leading);
    assert_eq!(s.len(), 30);
    assert_eq!(ids(&s)[20], "50-0");

    // Page 48 renders wide, pages 49 and 50 narrow.
    let mut sizes = [100.0; 30];
    sizes[..10].fill(300.0);
    let rects = ItemRects::from_sizes(0.0, &sizes, 10.0);

    let c = s.compensate(0.0, &rects).unwrap();
    assert_eq!(c.applied, 2);
    assert_eq!(c.to, rects.extents()[20].start);
    assert_eq!(c.to, 4200.0);
}

#[test]
fn prune_then_prepend_measures_each_block_separately() {
    let mut s = ready_strip(StripOptions::default().with_max_batches(2));
    extend(&mut s, Edge::Trailing);
    assert!(s.compensate(0.0, &FixedSpan::default()).is_none());

    // Page 50 is pruned by trailing growth, then page 49 is prepended (pruning page 52).
    extend(&mut s, Edge::Trailing);
    extend(&mut s, Edge::Leading);
    assert_eq!(s.window().page_span(), Some((49, 51)));

    // Page 49 renders at 200px, page 51 (and the pruned page 50) at 100px.
    let mut sizes = [100.0; 20];
    sizes[..10].fill(200.0);
    let rects = ItemRects::from_sizes(0.0, &sizes, 10.0);

    // Page 51 started at 1100 behind the old page 50 and now starts behind page 49.
    let c = s.compensate(3000.0, &rects).unwrap();
    assert_eq!(c.applied, 2);
    assert_eq!(rects.extents()[10].start - c.to, 1100.0 - 3000.0);
}

#[test]
fn fixed_span_and_item_rects_agree() {
    let fixed = FixedSpan::new(300.0, 16.0, 12);
    let rects = ItemRects::from_sizes(40.0, &[300.0; 12], 16.0);
    for edge in [Edge::Leading, Edge::Trailing] {
        for n in 0..15 {
            assert_eq!(fixed.span_of(edge, n), rects.span_of(edge, n));
        }
    }
    assert_eq!(fixed.span_of(Edge::Leading, 1), 300.0);
    assert_eq!(fixed.span_of(Edge::Leading, 3), 300.0 * 3.0 + 32.0);
    assert_eq!(rects.gap(), 16.0);
    assert_eq!(fixed.total(), 12.0 * 300.0 + 11.0 * 16.0);
}

#[test]
fn item_rects_measure_each_edge_from_live_layout() {
    let rects = ItemRects::from_extents([
        Extent::new(0.0, 100.0),
        Extent::new(110.0, 300.0),
        Extent::new(310.0, 350.0),
    ]);
    assert_eq!(rects.span_of(Edge::Leading, 2), 300.0);
    assert_eq!(rects.span_of(Edge::Trailing, 2), 240.0);
    assert_eq!(rects.span_of(Edge::Trailing, 1), 40.0);
    assert_eq!(rects.span_of(Edge::Leading, 0), 0.0);
}

#[test]
fn measurers_never_fail_on_degenerate_layout() {
    assert_eq!(ItemRects::new().span_of(Edge::Leading, 10), 0.0);
    assert_eq!(ItemRects::new().gap(), 0.0);
    assert_eq!(FixedSpan::default().span_of(Edge::Trailing, 3), 0.0);
    let nan = FixedSpan::new(f64::NAN, 0.0, 3);
    assert_eq!(nan.span_of(Edge::Leading, 3), 0.0);
    let inverted = ItemRects::from_extents([Extent::new(50.0, 10.0)]);
    assert_eq!(inverted.span_of(Edge::Leading, 1), 0.0);
    assert_eq!(Extent::new(50.0, 10.0).size(), 0.0);
    assert_eq!(Extent::new(110.0, 300.0).size(), 190.0);
}

#[test]
fn snapping_rounds_to_device_pixels() {
    assert_eq!(snap_to_device_pixels(10.26, 2.0), 10.5);
    assert_eq!(snap_to_device_pixels(10.24, 2.0), 10.0);
    assert_eq!(snap_to_device_pixels(10.4, 0.0), 10.0);
}

#[test]
fn debounce_reschedules_and_fires_once() {
    let mut d = Debounce::new(80);
    assert!(!d.poll(1000));
    d.schedule(0);
    d.schedule(50);
    assert!(!d.poll(100));
    assert!(d.poll(130));
    assert!(!d.poll(200));
    d.schedule(300);
    d.cancel();
    assert!(!d.poll(1000));
}

#[test]
fn window_reports_page_span_and_lookup() {
    let mut s = ready_strip(StripOptions::default());
    extend(&mut s, Edge::Leading);
    extend(&mut s, Edge::Trailing);
    let w = s.window();
    assert_eq!(w.page_span(), Some((49, 51)));
    let key = w.get(15).unwrap().key;
    assert_eq!(w.index_of(key), Some(15));
    assert_eq!(w.first().unwrap().id, "49-0");
    assert_eq!(w.last().unwrap().id, "51-9");
    let mut n = 0;
    for _ in w {
        n += 1;
    }
    assert_eq!(n, 30);
}

#[test]
fn property_random_fetch_sequences_hold_invariants() {
    // Fixed seeds => deterministic, non-flaky "property" coverage.
    for seed in [1u64, 2, 3, 7, 42, 123, 2025] {
        let mut rng = Lcg::new(seed);
        let batch_size = rng.gen_range_usize(1, 12);
        let max_batches = rng.gen_range_usize(1, 7);
        let initial_page = rng.gen_range_usize(1, 8) as u32;
        let options = StripOptions::default()
            .with_batch_size(batch_size)
            .with_max_batches(max_batches)
            .with_initial_page(initial_page);
        let mut s = ready_strip(options);

        let mut outstanding: Vec<FetchRequest> = Vec::new();
        let mut network_calls = 0usize;

        for _ in 0..300 {
            match rng.gen_range_usize(0, 4) {
                0 | 1 => {
                    let edge = if rng.gen_bool() {
                        Edge::Leading
                    } else {
                        Edge::Trailing
                    };
                    let was_fetching = s.is_fetching(edge);
                    match s.request_more(edge) {
                        Some(req) => {
                            assert!(!was_fetching);
                            network_calls += 1;
                            outstanding.push(req);
                        }
                        None => assert!(was_fetching),
                    }
                }
                2 if !outstanding.is_empty() => {
                    // Resolve in arbitrary order.
                    let i = rng.gen_range_usize(0, outstanding.len());
                    let req = outstanding.swap_remove(i);
                    let edge = match req.purpose {
                        FetchPurpose::Extend(edge) => edge,
                        FetchPurpose::Initial => unreachable!(),
                    };
                    let before = s.cursor(edge);
                    let fail = rng.next_u64() % 5 == 0;
                    let result = if fail {
                        Err(SourceError::Status(503))
                    } else {
                        let n = rng.gen_range_usize(0, batch_size * 2);
                        Ok(page(req.page, n))
                    };
                    let out = s.complete(req, result);
                    let after = s.cursor(edge);
                    match out {
                        FetchOutcome::Extended { .. } => match edge {
                            Edge::Trailing => assert_eq!(after, before + 1),
                            Edge::Leading => assert_eq!(after, before.saturating_sub(1).max(1)),
                        },
                        FetchOutcome::Failed { .. } => assert_eq!(after, before),
                        other => panic!("unexpected outcome {other:?}"),
                    }
                    assert!(after >= 1);
                    assert!(!s.is_fetching(edge));
                }
                _ => {
                    let len = s.len();
                    let offset = rng.gen_range_usize(0, 10_000) as f64;
                    s.compensate(offset, &FixedSpan::new(50.0, 4.0, len));
                    s.finish_compensation();
                }
            }

            assert!(s.len() <= options.max_items());
            let in_flight = outstanding.len();
            assert!(in_flight <= 2);
            assert_unique_keys(&s);
        }
        assert!(network_calls > 0);
    }
}
