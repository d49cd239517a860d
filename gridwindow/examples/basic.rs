// Example: window a 50k-item poster grid and jump to an item.
use gridwindow::{
    Flow, GridElementGeometry, GridMeasurement, GridWindow, GridWindowOptions, ItemBox,
    ResizeMeasurement, ScrollParents, SpaceAroundWindow, Viewport,
};

fn main() {
    let grid = GridMeasurement {
        row_gap: 16.0,
        col_gap: 16.0,
        flow: Flow::Row,
        columns: 6,
        rows: 1,
    };
    let measurement = ResizeMeasurement::from_item_box(
        grid,
        ItemBox {
            width: 180.0,
            height: 270.0,
        },
    );

    let mut w = GridWindow::new(
        GridWindowOptions::new(50_000)
            .with_measurement(Some(measurement))
            .with_initial_viewport(Some(Viewport::new(1176.0, 900.0))),
    );

    println!("content_size={:?}", w.content_size());
    println!("at top: buffer={:?}", w.buffer_meta());

    w.apply_scroll_frame(Viewport::new(1176.0, 900.0), SpaceAroundWindow {
        left: 0.0,
        top: 123_456.0,
    });
    let items = w.visible_items();
    println!(
        "scrolled: buffer={:?} window={:?} mounted={}",
        w.buffer_meta(),
        w.visible_window(),
        items.len()
    );
    println!("first={:?}", items.first());

    let target = w.scroll_target(
        &ScrollParents::default(),
        &GridElementGeometry::default(),
        49_999,
    );
    println!("scroll to last item: {target:?}");
}
