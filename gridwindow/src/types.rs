use alloc::string::String;
use core::fmt;

/// The axis along which the grid auto-places items and along which the user scrolls.
///
/// `Row` fills rows left to right and scrolls vertically. `Column` fills columns top to bottom
/// and scrolls horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flow {
    #[default]
    Row,
    Column,
}

impl Flow {
    /// Returns `true` when content scrolls horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Column)
    }
}

/// A snapshot of a grid container's live layout, read by a [`crate::GridMeasurementSource`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMeasurement {
    pub row_gap: f64,
    pub col_gap: f64,
    pub flow: Flow,
    /// Number of column tracks (>= 1).
    pub columns: usize,
    /// Number of row tracks (>= 1).
    pub rows: usize,
}

impl GridMeasurement {
    /// A single-line layout: one column for `Row` flow, one row for `Column` flow.
    ///
    /// Plain lists are grids with one crosswise track; there is no separate list code path.
    pub fn list(flow: Flow) -> Self {
        Self {
            row_gap: 0.0,
            col_gap: 0.0,
            flow,
            columns: 1,
            rows: 1,
        }
    }

    pub fn with_gaps(mut self, row_gap: f64, col_gap: f64) -> Self {
        self.row_gap = row_gap;
        self.col_gap = col_gap;
        self
    }
}

/// A single item's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBox {
    pub width: f64,
    pub height: f64,
}

/// A [`GridMeasurement`] plus the tracked item's size including its trailing gap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeMeasurement {
    pub grid: GridMeasurement,
    pub item_height_with_gap: f64,
    pub item_width_with_gap: f64,
}

impl ResizeMeasurement {
    pub fn flow(&self) -> Flow {
        self.grid.flow
    }

    /// Returns `true` when the measurement meets the engine's preconditions: positive finite
    /// item sizes, non-negative finite gaps and at least one row and column.
    pub fn is_valid(&self) -> bool {
        let g = &self.grid;
        self.item_width_with_gap.is_finite()
            && self.item_height_with_gap.is_finite()
            && self.item_width_with_gap > 0.0
            && self.item_height_with_gap > 0.0
            && g.row_gap.is_finite()
            && g.col_gap.is_finite()
            && g.row_gap >= 0.0
            && g.col_gap >= 0.0
            && g.columns > 0
            && g.rows > 0
    }

    /// Number of tracks perpendicular to the scroll axis.
    pub fn crosswise_lines(&self) -> usize {
        if self.grid.flow.is_horizontal() {
            self.grid.rows
        } else {
            self.grid.columns
        }
    }

    /// Gap along the scroll axis.
    pub fn scroll_gap(&self) -> f64 {
        if self.grid.flow.is_horizontal() {
            self.grid.col_gap
        } else {
            self.grid.row_gap
        }
    }

    /// Item size (including the trailing gap) along the scroll axis.
    pub fn scroll_item_size(&self) -> f64 {
        if self.grid.flow.is_horizontal() {
            self.item_width_with_gap
        } else {
            self.item_height_with_gap
        }
    }
}

/// Scroll distance already consumed before the visible viewport, per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceAroundWindow {
    pub left: f64,
    pub top: f64,
}

impl SpaceAroundWindow {
    /// The space along the scroll axis of `flow`.
    pub fn behind(&self, flow: Flow) -> f64 {
        if flow.is_horizontal() {
            self.left
        } else {
            self.top
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The viewport extent along the scroll axis of `flow`.
    pub fn along(&self, flow: Flow) -> f64 {
        if flow.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }
}

/// The index window that should have materialized nodes.
///
/// `buffered_offset + buffered_length` may exceed the collection length; clamping happens in
/// [`crate::resolve_window`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferMeta {
    pub buffered_offset: usize,
    pub buffered_length: usize,
}

/// A clamped half-open slice `[first, last)` of the collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub first: usize,
    pub last: usize, // exclusive
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index < self.last
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.first..self.last
    }
}

/// Pixel offset of an item relative to the grid's first cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOffset {
    pub x: f64,
    pub y: f64,
}

impl ItemOffset {
    /// Writes the CSS transform for this offset, e.g. `translate(110px, 210px)`.
    pub fn write_transform(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "translate({}px, {}px)", self.x, self.y)
    }
}

/// Grid area every materialized item occupies; positioning is done purely via `transform`.
pub(crate) const STACKED_GRID_AREA: &str = "1/1";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub transform: String,
    pub grid_area: Option<String>,
}

impl ItemStyle {
    pub fn for_offset(offset: ItemOffset) -> Self {
        let mut transform = String::new();
        // Writing into a `String` cannot fail.
        let _ = offset.write_transform(&mut transform);
        Self {
            transform,
            grid_area: Some(String::from(STACKED_GRID_AREA)),
        }
    }
}

/// A materialized item: its collection index, numeric offset and rendered style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InternalItem {
    pub index: usize,
    pub offset: ItemOffset,
    pub style: ItemStyle,
}

/// The scrollable content extent along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentSize {
    Width(f64),
    Height(f64),
}

impl ContentSize {
    pub fn width(self) -> Option<f64> {
        match self {
            Self::Width(w) => Some(w),
            Self::Height(_) => None,
        }
    }

    pub fn height(self) -> Option<f64> {
        match self {
            Self::Height(h) => Some(h),
            Self::Width(_) => None,
        }
    }
}

/// Which scrolling ancestor should receive the scroll command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

/// Absolute scroll coordinates that bring an index into view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    pub top: f64,
    pub left: f64,
    pub target: ScrollAxis,
}
