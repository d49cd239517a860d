// Example: stream a burst of scroll positions to a background worker and keep only the latest.
use std::time::Duration;

use gridwindow::{Flow, GridMeasurement, ItemBox, ResizeMeasurement, SpaceAroundWindow, Viewport};
use gridwindow_worker::{
    WindowEngine, WindowRequest, WindowResponse, WorkerEngine, WorkerError, WorkerOptions,
};

fn main() -> Result<(), WorkerError> {
    let measurement = ResizeMeasurement::from_item_box(
        GridMeasurement {
            row_gap: 16.0,
            col_gap: 16.0,
            flow: Flow::Row,
            columns: 6,
            rows: 1,
        },
        ItemBox {
            width: 180.0,
            height: 270.0,
        },
    );
    let viewport = Viewport::new(1176.0, 900.0);

    let mut worker = WorkerEngine::spawn(WorkerOptions::new().with_cache_capacity(32))?;

    // A fling: many positions in quick succession, then settle back on one of them.
    for top in (0..40).map(|i| i as f64 * 286.0).chain([5_720.0]) {
        worker.submit(WindowRequest::Window {
            space: SpaceAroundWindow { left: 0.0, top },
            measurement,
            multiplier: 1.5,
            viewport,
            collection_length: 50_000,
        })?;
    }

    let latest = worker.recv_latest(Duration::from_secs(1))?;
    match latest.payload {
        WindowResponse::Window { buffer, items } => println!(
            "seq={} buffer={buffer:?} mounted={} first={:?}",
            latest.seq.get(),
            items.len(),
            items.first().map(|it| it.style.transform.as_str())
        ),
        other => println!("seq={} response={other:?}", latest.seq.get()),
    }
    println!("stale responses dropped: {}", worker.dropped());

    let stats = worker.shutdown()?;
    println!("cache: {stats:?}");
    Ok(())
}
