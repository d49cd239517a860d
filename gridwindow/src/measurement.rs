use crate::{GridMeasurement, ItemBox, ResizeMeasurement};

/// Reads a [`GridMeasurement`] from a rendered grid container.
///
/// This is implemented by the host (e.g. by reading computed `grid-template-columns`/`rows`,
/// gaps and `grid-auto-flow` from a live element). The engine never touches the element itself.
pub trait GridMeasurementSource {
    type Element: ?Sized;

    fn measure_grid(&self, grid: &Self::Element) -> GridMeasurement;
}

impl<S: GridMeasurementSource + ?Sized> GridMeasurementSource for &S {
    type Element = S::Element;

    fn measure_grid(&self, grid: &Self::Element) -> GridMeasurement {
        (**self).measure_grid(grid)
    }
}

impl ResizeMeasurement {
    /// Combines a grid measurement with one item's box: each item size gains the gap on its
    /// trailing edge.
    pub fn from_item_box(grid: GridMeasurement, item: ItemBox) -> Self {
        Self {
            grid,
            item_height_with_gap: item.height + grid.row_gap,
            item_width_with_gap: item.width + grid.col_gap,
        }
    }

    /// Reads the grid through `source` and combines it with `item`.
    pub fn measure<S: GridMeasurementSource>(
        source: &S,
        grid_element: &S::Element,
        item: ItemBox,
    ) -> Self {
        let grid = source.measure_grid(grid_element);
        vtrace!(
            columns = grid.columns,
            rows = grid.rows,
            item_width = item.width,
            item_height = item.height,
            "ResizeMeasurement::measure"
        );
        Self::from_item_box(grid, item)
    }
}
