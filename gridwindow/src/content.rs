use crate::{ContentSize, ResizeMeasurement};

/// Computes the scrollable content extent for `length` items.
///
/// The extent spans the same layout as [`crate::offset_by_index`], minus the trailing gap of
/// the last line. Only the dimension along the scroll axis is produced.
pub fn compute_content_size(measurement: &ResizeMeasurement, length: usize) -> ContentSize {
    let grid = &measurement.grid;
    if grid.flow.is_horizontal() {
        let lines = length.div_ceil(grid.rows.max(1));
        ContentSize::Width(measurement.item_width_with_gap * lines as f64 - grid.col_gap)
    } else {
        let lines = length.div_ceil(grid.columns.max(1));
        ContentSize::Height(measurement.item_height_with_gap * lines as f64 - grid.row_gap)
    }
}
