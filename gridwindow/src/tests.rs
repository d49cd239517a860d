use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

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

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_f64(&mut self, start: u32, end_exclusive: u32) -> f64 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as f64
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn grid(flow: Flow, columns: usize, rows: usize, gap: f64) -> GridMeasurement {
    GridMeasurement {
        row_gap: gap,
        col_gap: gap,
        flow,
        columns,
        rows,
    }
}

/// Row flow, 4 columns, 100x200 boxes with a 10px gap (110x210 with gap).
fn poster_grid() -> ResizeMeasurement {
    ResizeMeasurement::from_item_box(
        grid(Flow::Row, 4, 1, 10.0),
        ItemBox {
            width: 100.0,
            height: 200.0,
        },
    )
}

fn random_measurement(rng: &mut Lcg) -> ResizeMeasurement {
    let flow = if rng.gen_bool() { Flow::Row } else { Flow::Column };
    let g = GridMeasurement {
        row_gap: rng.gen_f64(0, 20),
        col_gap: rng.gen_f64(0, 20),
        flow,
        columns: rng.gen_range_usize(1, 12),
        rows: rng.gen_range_usize(1, 12),
    };
    ResizeMeasurement::from_item_box(
        g,
        ItemBox {
            width: rng.gen_f64(1, 400),
            height: rng.gen_f64(1, 400),
        },
    )
}

#[test]
fn resize_measurement_adds_trailing_gap() {
    let m = poster_grid();
    assert_eq!(m.item_width_with_gap, 110.0);
    assert_eq!(m.item_height_with_gap, 210.0);
    assert!(m.is_valid());
}

#[test]
fn resize_measurement_reads_through_source() {
    struct FixedSource(GridMeasurement);

    impl GridMeasurementSource for FixedSource {
        type Element = str;

        fn measure_grid(&self, grid: &str) -> GridMeasurement {
            assert_eq!(grid, "library-grid");
            self.0
        }
    }

    let source = FixedSource(grid(Flow::Column, 1, 3, 4.0));
    let m = ResizeMeasurement::measure(
        &source,
        "library-grid",
        ItemBox {
            width: 50.0,
            height: 60.0,
        },
    );
    assert_eq!(m.item_width_with_gap, 54.0);
    assert_eq!(m.item_height_with_gap, 64.0);
    assert_eq!(m.crosswise_lines(), 3);
}

#[test]
fn invalid_measurements_are_reported() {
    let mut m = poster_grid();
    m.item_height_with_gap = 0.0;
    assert!(!m.is_valid());

    let mut m = poster_grid();
    m.grid.columns = 0;
    assert!(!m.is_valid());

    let mut m = poster_grid();
    m.grid.row_gap = f64::NAN;
    assert!(!m.is_valid());
}

#[test]
fn buffer_meta_at_top_clamps_offset_to_zero() {
    let m = poster_grid();
    // (630 + 10) / 210 rounds to 3 lines of 4 items; 12 is even => 48 rendered.
    let meta = compute_buffer_meta(SpaceAroundWindow::default(), &m, 1.0, 440.0, 630.0);
    assert_eq!(
        meta,
        BufferMeta {
            buffered_offset: 0,
            buffered_length: 48,
        }
    );
}

#[test]
fn buffer_meta_centers_extra_items_around_viewport() {
    let m = poster_grid();
    let space = SpaceAroundWindow {
        left: 0.0,
        top: 2100.0,
    };
    // lines_before = ceil(2110 / 210) = 11 => 44 items before.
    // around = 48 - 12 = 36 => offset = 44 - 18 = 26.
    let meta = compute_buffer_meta(space, &m, 1.0, 440.0, 630.0);
    assert_eq!(meta.buffered_offset, 26);
    assert_eq!(meta.buffered_length, 48);
}

#[test]
fn buffer_meta_odd_scaled_count_adds_one() {
    let m = ResizeMeasurement::from_item_box(
        grid(Flow::Row, 3, 1, 10.0),
        ItemBox {
            width: 100.0,
            height: 200.0,
        },
    );
    let space = SpaceAroundWindow {
        left: 0.0,
        top: 2100.0,
    };
    // 3 lines * 3 columns = 9 (odd) => 9 * 4 + 1 = 37; around = 28 => offset = 33 - 14.
    let meta = compute_buffer_meta(space, &m, 1.0, 330.0, 630.0);
    assert_eq!(meta.buffered_length, 37);
    assert_eq!(meta.buffered_offset, 19);
}

#[test]
fn buffer_meta_column_flow_uses_horizontal_axis() {
    let m = ResizeMeasurement::from_item_box(
        grid(Flow::Column, 1, 2, 10.0),
        ItemBox {
            width: 140.0,
            height: 90.0,
        },
    );
    let space = SpaceAroundWindow {
        left: 1500.0,
        top: 99999.0,
    };
    // round(910 / 150) = 6 lines * 2 rows = 12 => 48; before = ceil(1510 / 150) * 2 = 22.
    let meta = compute_buffer_meta(space, &m, 1.0, 900.0, 200.0);
    assert_eq!(meta.buffered_length, 48);
    assert_eq!(meta.buffered_offset, 4);
}

#[test]
fn buffer_meta_rounds_half_lines_up() {
    let m = ResizeMeasurement::from_item_box(
        GridMeasurement::list(Flow::Row).with_gaps(10.0, 0.0),
        ItemBox {
            width: 300.0,
            height: 200.0,
        },
    );
    // (305 + 10) / 210 = 1.5 => 2 lines of 1 item => 8 rendered.
    let meta = compute_buffer_meta(SpaceAroundWindow::default(), &m, 1.0, 300.0, 305.0);
    assert_eq!(meta.buffered_length, 8);
}

#[test]
fn buffer_meta_multiplier_scales_length() {
    let m = poster_grid();
    let one = compute_buffer_meta(SpaceAroundWindow::default(), &m, 1.0, 440.0, 630.0);
    let two = compute_buffer_meta(SpaceAroundWindow::default(), &m, 2.0, 440.0, 630.0);
    assert_eq!(one.buffered_length, 48);
    assert_eq!(two.buffered_length, 96);
}

#[test]
fn buffer_is_never_smaller_than_items_on_screen() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2000 {
        let m = random_measurement(&mut rng);
        let viewport = Viewport::new(rng.gen_f64(1, 3000), rng.gen_f64(1, 3000));
        let space = SpaceAroundWindow {
            left: rng.gen_f64(0, 100_000),
            top: rng.gen_f64(0, 100_000),
        };
        let multiplier = [0.1, 0.5, 1.0, 1.5, 2.0, 3.0][rng.gen_range_usize(0, 6)];
        let meta = compute_buffer_meta_for(space, &m, multiplier, viewport);

        let lines = ((viewport.along(m.flow()) + m.scroll_gap()) / m.scroll_item_size() + 0.5)
            .floor() as usize;
        let on_screen = lines * m.crosswise_lines();
        assert!(
            meta.buffered_length >= on_screen,
            "buffer {meta:?} smaller than {on_screen} on-screen items for {m:?}"
        );
    }
}

#[test]
fn resolve_window_examples() {
    let buffer = BufferMeta {
        buffered_offset: 500,
        buffered_length: 40,
    };
    assert_eq!(
        resolve_window(buffer, 1000),
        VisibleWindow {
            first: 500,
            last: 540,
        }
    );
    assert_eq!(resolve_window(buffer, 20), VisibleWindow { first: 0, last: 20 });
}

#[test]
fn resolve_window_slides_back_at_tail() {
    let buffer = BufferMeta {
        buffered_offset: 980,
        buffered_length: 40,
    };
    let w = resolve_window(buffer, 1000);
    assert_eq!(w, VisibleWindow {
        first: 960,
        last: 1000,
    });
    assert_eq!(w.len(), 40);
}

#[test]
fn resolve_window_empty_collection() {
    let buffer = BufferMeta {
        buffered_offset: 10,
        buffered_length: 0,
    };
    let w = resolve_window(buffer, 0);
    assert!(w.is_empty());
    assert_eq!(w, VisibleWindow { first: 0, last: 0 });
}

#[test]
fn resolve_window_invariants_hold_for_random_inputs() {
    let mut rng = Lcg::new(42);
    for _ in 0..5000 {
        let len = rng.gen_range_usize(0, 5000);
        let buffer = BufferMeta {
            buffered_offset: rng.gen_range_usize(0, 6000),
            buffered_length: rng.gen_range_usize(0, 400),
        };
        let w = resolve_window(buffer, len);

        assert!(w.first <= w.last, "{w:?}");
        assert!(w.last <= len, "{w:?} exceeds {len}");

        if len <= buffer.buffered_length {
            assert_eq!(w, VisibleWindow { first: 0, last: len });
        } else {
            assert_eq!(w.len(), buffer.buffered_length, "{buffer:?} len={len}");
            if buffer.buffered_offset + buffer.buffered_length > len {
                assert_eq!(w.last, len);
                assert_eq!(w.first, len - buffer.buffered_length);
            } else {
                assert_eq!(w.first, buffer.buffered_offset);
            }
        }
    }
}

#[test]
fn offset_by_index_row_flow_example() {
    let m = poster_grid();
    assert_eq!(offset_by_index(5, &m), ItemOffset { x: 110.0, y: 210.0 });
    assert_eq!(offset_by_index(0, &m), ItemOffset { x: 0.0, y: 0.0 });
    assert_eq!(offset_by_index(3, &m), ItemOffset { x: 330.0, y: 0.0 });
}

#[test]
fn offset_by_index_column_flow() {
    let m = ResizeMeasurement::from_item_box(
        grid(Flow::Column, 1, 3, 0.0),
        ItemBox {
            width: 150.0,
            height: 80.0,
        },
    );
    assert_eq!(offset_by_index(4, &m), ItemOffset { x: 150.0, y: 80.0 });
    assert_eq!(offset_by_index(2, &m), ItemOffset { x: 0.0, y: 160.0 });
}

#[test]
fn offset_by_index_is_deterministic_and_flow_symmetric() {
    let mut rng = Lcg::new(7);
    for _ in 0..2000 {
        let m = random_measurement(&mut rng);
        let i = rng.gen_range_usize(0, 100_000);
        let a = offset_by_index(i, &m);
        assert_eq!(a, offset_by_index(i, &m));

        match m.flow() {
            Flow::Row => {
                let b = offset_by_index(i + m.grid.columns, &m);
                assert_eq!(a.x, b.x);
                assert_eq!(b.y - a.y, m.item_height_with_gap);
            }
            Flow::Column => {
                let b = offset_by_index(i + m.grid.rows, &m);
                assert_eq!(a.y, b.y);
                assert_eq!(b.x - a.x, m.item_width_with_gap);
            }
        }
    }
}

#[test]
fn list_layout_is_single_track_grid() {
    let m = ResizeMeasurement::from_item_box(
        GridMeasurement::list(Flow::Row),
        ItemBox {
            width: 300.0,
            height: 48.0,
        },
    );
    for i in 0..10 {
        assert_eq!(offset_by_index(i, &m), ItemOffset {
            x: 0.0,
            y: i as f64 * 48.0,
        });
    }
}

#[test]
fn resolved_items_carry_transform_and_grid_area() {
    let m = poster_grid();
    let buffer = BufferMeta {
        buffered_offset: 4,
        buffered_length: 3,
    };
    let items = resolve_visible_items(buffer, &m, 100);
    let indexes: Vec<usize> = items.iter().map(|it| it.index).collect();
    assert_eq!(indexes, vec![4, 5, 6]);

    assert_eq!(items[1].style.transform, "translate(110px, 210px)");
    assert_eq!(items[1].style.grid_area.as_deref(), Some("1/1"));
    assert_eq!(items[0].style.transform, "translate(0px, 210px)");
}

#[test]
fn fractional_offsets_render_without_trailing_zeros() {
    let style = ItemStyle::for_offset(ItemOffset { x: 12.5, y: 0.0 });
    assert_eq!(style.transform, "translate(12.5px, 0px)");
}

#[test]
fn collect_visible_items_reuses_buffer() {
    let m = poster_grid();
    let buffer = BufferMeta {
        buffered_offset: 0,
        buffered_length: 8,
    };
    let mut out = Vec::new();
    collect_visible_items(buffer, &m, 5, &mut out);
    assert_eq!(out.len(), 5);

    collect_visible_items(buffer, &m, 100, &mut out);
    assert_eq!(out.len(), 8);
    assert!(out.windows(2).all(|w| w[0].index < w[1].index));
}

#[test]
fn for_each_visible_offset_skips_style_formatting() {
    let m = poster_grid();
    let buffer = BufferMeta {
        buffered_offset: 96,
        buffered_length: 8,
    };
    let mut seen = Vec::new();
    for_each_visible_offset(buffer, &m, 100, |i, off| seen.push((i, off)));
    assert_eq!(seen.first().map(|(i, _)| *i), Some(92));
    assert_eq!(seen.last().map(|(i, _)| *i), Some(99));
    assert_eq!(seen[0].1, offset_by_index(92, &m));
}

#[test]
fn content_size_row_flow_example() {
    let m = ResizeMeasurement {
        grid: grid(Flow::Row, 5, 1, 10.0),
        item_height_with_gap: 200.0,
        item_width_with_gap: 150.0,
    };
    let size = compute_content_size(&m, 23);
    assert_eq!(size, ContentSize::Height(990.0));
    assert_eq!(size.height(), Some(990.0));
    assert_eq!(size.width(), None);
}

#[test]
fn content_size_column_flow_sets_width() {
    let m = ResizeMeasurement {
        grid: grid(Flow::Column, 1, 2, 10.0),
        item_height_with_gap: 100.0,
        item_width_with_gap: 160.0,
    };
    // ceil(5 / 2) = 3 columns.
    assert_eq!(compute_content_size(&m, 5), ContentSize::Width(470.0));
}

#[test]
fn scroll_target_adds_grid_offsets_per_ancestor() {
    let m = poster_grid();
    let parents = ScrollParents {
        vertical: ScrollParentGeometry {
            left: 0.0,
            top: 50.0,
            scroll_left: 0.0,
            scroll_top: 300.0,
        },
        horizontal: ScrollParentGeometry {
            left: 20.0,
            top: 0.0,
            scroll_left: 5.0,
            scroll_top: 0.0,
        },
    };
    let grid_el = GridElementGeometry {
        left: 40.0,
        top: 120.0,
        padding_left: 8.0,
        padding_top: 12.0,
        border_left: 1.0,
        border_top: 2.0,
    };
    // index 9 => (110, 420).
    let target = compute_scroll_target(&parents, &grid_el, &m, 9);
    assert_eq!(target, ScrollTarget {
        top: 804.0,
        left: 144.0,
        target: ScrollAxis::Vertical,
    });
}

#[test]
fn scroll_target_column_flow_targets_horizontal_parent() {
    struct SameParent;

    impl ScrollParentLocator for SameParent {
        type Element = ();

        fn scroll_parents(&self, _: &()) -> ScrollParents {
            ScrollParents::default()
        }
    }

    let m = ResizeMeasurement::from_item_box(
        grid(Flow::Column, 1, 2, 0.0),
        ItemBox {
            width: 100.0,
            height: 50.0,
        },
    );
    let target = compute_scroll_target_with(&SameParent, &(), &GridElementGeometry::default(), &m, 5);
    assert_eq!(target.target, ScrollAxis::Horizontal);
    assert_eq!(target.left, 200.0);
    assert_eq!(target.top, 50.0);
}

fn window_with_grid(count: usize) -> GridWindow {
    GridWindow::new(
        GridWindowOptions::new(count)
            .with_measurement(Some(poster_grid()))
            .with_initial_viewport(Some(Viewport::new(440.0, 630.0))),
    )
}

#[test]
fn grid_window_matches_pure_functions() {
    let mut w = window_with_grid(1000);
    let space = SpaceAroundWindow {
        left: 0.0,
        top: 2100.0,
    };
    w.set_space(space);

    let m = poster_grid();
    let expected = compute_buffer_meta(space, &m, 1.0, 440.0, 630.0);
    assert_eq!(w.buffer_meta(), Some(expected));
    assert_eq!(w.visible_items(), resolve_visible_items(expected, &m, 1000));
    assert_eq!(w.content_size(), Some(compute_content_size(&m, 1000)));
    assert_eq!(w.visible_window(), resolve_window(expected, 1000));
}

#[test]
fn grid_window_without_measurement_is_empty() {
    let w = GridWindow::new(
        GridWindowOptions::new(100).with_initial_viewport(Some(Viewport::new(400.0, 400.0))),
    );
    assert_eq!(w.buffer_meta(), None);
    assert!(w.visible_window().is_empty());
    assert!(w.visible_items().is_empty());
    assert_eq!(w.content_size(), None);
    assert_eq!(w.offset_of(0), None);
}

#[test]
fn grid_window_rejects_degenerate_inputs() {
    let mut w = window_with_grid(100);
    w.set_viewport(Viewport::new(0.0, 0.0));
    assert_eq!(w.buffer_meta(), None);

    let mut w = window_with_grid(100);
    w.set_multiplier(0.0);
    assert_eq!(w.buffer_meta(), None);

    let mut m = poster_grid();
    m.item_width_with_gap = 0.0;
    let mut w = window_with_grid(100);
    w.set_measurement(Some(m));
    assert_eq!(w.buffer_meta(), None);
    assert_eq!(w.content_size(), None);
}

#[test]
fn grid_window_memo_invalidates_on_input_change() {
    let mut w = window_with_grid(1000);
    let before = w.buffer_meta();

    w.set_space(SpaceAroundWindow {
        left: 0.0,
        top: 4200.0,
    });
    let after = w.buffer_meta();
    assert_ne!(before, after);

    w.set_multiplier(2.0);
    assert_eq!(w.buffer_meta().map(|b| b.buffered_length), Some(96));

    // Count does not affect the buffer window, only the resolved slice.
    let buffer = w.buffer_meta();
    w.set_count(10);
    assert_eq!(w.buffer_meta(), buffer);
    assert_eq!(w.visible_window(), VisibleWindow { first: 0, last: 10 });
}

#[test]
fn grid_window_offset_of_is_bounds_checked() {
    let w = window_with_grid(6);
    assert_eq!(w.offset_of(5), Some(ItemOffset { x: 110.0, y: 210.0 }));
    assert_eq!(w.offset_of(6), None);
}

#[test]
fn grid_window_scroll_target_clamps_index() {
    let w = window_with_grid(6);
    let parents = ScrollParents::default();
    let grid_el = GridElementGeometry::default();
    assert_eq!(
        w.scroll_target(&parents, &grid_el, 100),
        w.scroll_target(&parents, &grid_el, 5)
    );

    let empty = window_with_grid(0);
    assert_eq!(empty.scroll_target(&parents, &grid_el, 0), None);
}

#[test]
fn grid_window_disabled_returns_empty_results() {
    let mut w = window_with_grid(1000);
    assert!(w.buffer_meta().is_some());
    w.set_enabled(false);
    assert_eq!(w.buffer_meta(), None);
    assert!(w.visible_items().is_empty());

    w.set_enabled(true);
    assert!(w.buffer_meta().is_some());
}

#[test]
fn batch_update_coalesces_on_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scrolling_calls = Arc::new(AtomicUsize::new(0));
    let mut w = GridWindow::new(
        GridWindowOptions::new(1000)
            .with_measurement(Some(poster_grid()))
            .with_on_change(Some({
                let calls = Arc::clone(&calls);
                let scrolling_calls = Arc::clone(&scrolling_calls);
                move |_: &GridWindow, is_scrolling: bool| {
                    calls.fetch_add(1, Ordering::Relaxed);
                    if is_scrolling {
                        scrolling_calls.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })),
    );

    w.apply_scroll_frame(Viewport::new(440.0, 630.0), SpaceAroundWindow {
        left: 0.0,
        top: 100.0,
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(scrolling_calls.load(Ordering::Relaxed), 1);
    assert!(w.is_scrolling());

    w.set_count(1000);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    w.set_count(2000);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn nested_batches_notify_once_and_refresh_buffer_inside() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut w = window_with_grid(1000);
    w.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &GridWindow, _: bool| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let before = w.buffer_meta();

    w.batch_update(|w| {
        w.set_space(SpaceAroundWindow {
            left: 0.0,
            top: 2100.0,
        });
        // The memo reflects the new space before the batch ends.
        assert_ne!(w.buffer_meta(), before);
        w.batch_update(|w| w.set_multiplier(2.0));
        assert_eq!(w.buffer_meta().map(|b| b.buffered_length), Some(96));
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // A batch without changes stays silent.
    w.batch_update(|w| w.set_count(1000));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn frame_state_roundtrips_through_restore() {
    let mut w = window_with_grid(1000);
    w.apply_scroll_frame(Viewport::new(800.0, 600.0), SpaceAroundWindow {
        left: 0.0,
        top: 4321.0,
    });
    let frame = w.frame_state();
    let buffer = w.buffer_meta();

    let mut restored = window_with_grid(1000);
    restored.restore_frame_state(frame);
    assert_eq!(restored.frame_state(), frame);
    assert_eq!(restored.buffer_meta(), buffer);
}

#[test]
fn update_options_rebuilds_from_clone() {
    let mut w = window_with_grid(1000);
    let before = w.buffer_meta();
    w.update_options(|o| o.multiplier = 3.0);
    assert_eq!(w.multiplier(), 3.0);
    assert_ne!(w.buffer_meta(), before);
}

#[test]
fn options_debug_skips_callbacks() {
    let opts = GridWindowOptions::new(3).with_on_change(Some(|_: &GridWindow, _: bool| {}));
    let s: String = alloc::format!("{opts:?}");
    assert!(s.contains("count: 3"));
    assert!(s.ends_with(".. }"));
}
