use crate::{ResizeMeasurement, ScrollAxis, ScrollTarget, offset_by_index};

/// Geometry of a scrolling ancestor: the origin of its viewport rect and its scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollParentGeometry {
    pub left: f64,
    pub top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// The nearest vertically and horizontally scrolling ancestors of a grid.
///
/// Both may be the same element (or the document root).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollParents {
    pub vertical: ScrollParentGeometry,
    pub horizontal: ScrollParentGeometry,
}

/// The grid element's bounding-rect origin and its leading-edge insets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridElementGeometry {
    pub left: f64,
    pub top: f64,
    pub padding_left: f64,
    pub padding_top: f64,
    pub border_left: f64,
    pub border_top: f64,
}

impl GridElementGeometry {
    /// Distance from the top of `parent`'s scrollable content to the grid's content box.
    fn content_top_in(&self, parent: &ScrollParentGeometry) -> f64 {
        self.top - parent.top + parent.scroll_top + self.padding_top + self.border_top
    }

    fn content_left_in(&self, parent: &ScrollParentGeometry) -> f64 {
        self.left - parent.left + parent.scroll_left + self.padding_left + self.border_left
    }
}

/// Locates the scrolling ancestors of an element.
///
/// Implemented by the host: the nearest horizontally and vertically overflowing ancestors,
/// falling back to the document root.
pub trait ScrollParentLocator {
    type Element: ?Sized;

    fn scroll_parents(&self, element: &Self::Element) -> ScrollParents;
}

/// Computes the absolute scroll coordinates that bring `target_index` into view.
///
/// The item's offset is shifted by the grid's position inside each scrolling ancestor plus its
/// leading padding and border. `target` names the ancestor to scroll: horizontal for
/// `Flow::Column`, vertical otherwise. The caller performs the actual scroll.
pub fn compute_scroll_target(
    scroll_parents: &ScrollParents,
    grid: &GridElementGeometry,
    measurement: &ResizeMeasurement,
    target_index: usize,
) -> ScrollTarget {
    let offset = offset_by_index(target_index, measurement);
    let target = if measurement.flow().is_horizontal() {
        ScrollAxis::Horizontal
    } else {
        ScrollAxis::Vertical
    };

    ScrollTarget {
        top: offset.y + grid.content_top_in(&scroll_parents.vertical),
        left: offset.x + grid.content_left_in(&scroll_parents.horizontal),
        target,
    }
}

/// Same as [`compute_scroll_target`], asking `locator` for the scrolling ancestors.
pub fn compute_scroll_target_with<L: ScrollParentLocator>(
    locator: &L,
    element: &L::Element,
    grid: &GridElementGeometry,
    measurement: &ResizeMeasurement,
    target_index: usize,
) -> ScrollTarget {
    let parents = locator.scroll_parents(element);
    compute_scroll_target(&parents, grid, measurement, target_index)
}
