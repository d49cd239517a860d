use alloc::vec::Vec;

use crate::{BufferMeta, InternalItem, ItemOffset, ItemStyle, ResizeMeasurement, VisibleWindow};

/// Clamps a buffer window to the collection bounds.
///
/// When the whole collection fits in the buffer, everything is rendered. Otherwise the window
/// keeps its length and slides backward at the tail, so the number of mounted nodes stays
/// constant while scrolling.
pub fn resolve_window(buffer: BufferMeta, collection_length: usize) -> VisibleWindow {
    let BufferMeta {
        buffered_offset,
        buffered_length,
    } = buffer;

    if collection_length <= buffered_length {
        return VisibleWindow {
            first: 0,
            last: collection_length,
        };
    }

    let offset_plus_length = buffered_offset.saturating_add(buffered_length);
    let first = if collection_length < offset_plus_length {
        collection_length - buffered_length
    } else {
        buffered_offset
    };
    let last = collection_length.min(offset_plus_length);

    VisibleWindow { first, last }
}

/// Computes the pixel offset of `index` relative to the grid's first cell.
///
/// With `Flow::Row`, index `i + columns` sits exactly one row below `i`; with `Flow::Column`,
/// index `i + rows` sits exactly one column right of `i`.
pub fn offset_by_index(index: usize, measurement: &ResizeMeasurement) -> ItemOffset {
    let grid = &measurement.grid;
    if grid.flow.is_horizontal() {
        let rows = grid.rows.max(1);
        ItemOffset {
            x: (index / rows) as f64 * measurement.item_width_with_gap,
            y: (index % rows) as f64 * measurement.item_height_with_gap,
        }
    } else {
        let columns = grid.columns.max(1);
        ItemOffset {
            x: (index % columns) as f64 * measurement.item_width_with_gap,
            y: (index / columns) as f64 * measurement.item_height_with_gap,
        }
    }
}

/// Visits every index of the resolved window with its offset, without formatting styles.
pub fn for_each_visible_offset(
    buffer: BufferMeta,
    measurement: &ResizeMeasurement,
    collection_length: usize,
    mut f: impl FnMut(usize, ItemOffset),
) {
    let window = resolve_window(buffer, collection_length);
    for index in window.iter() {
        f(index, offset_by_index(index, measurement));
    }
}

/// Visits every materialized item of the resolved window in ascending index order.
pub fn for_each_visible_item(
    buffer: BufferMeta,
    measurement: &ResizeMeasurement,
    collection_length: usize,
    mut f: impl FnMut(InternalItem),
) {
    for_each_visible_offset(buffer, measurement, collection_length, |index, offset| {
        f(InternalItem {
            index,
            offset,
            style: ItemStyle::for_offset(offset),
        });
    });
}

/// Collects the materialized items into `out` (clears `out` first).
///
/// Prefer this over [`resolve_visible_items`] on hot paths: `out` can be reused across frames.
pub fn collect_visible_items(
    buffer: BufferMeta,
    measurement: &ResizeMeasurement,
    collection_length: usize,
    out: &mut Vec<InternalItem>,
) {
    out.clear();
    out.reserve(resolve_window(buffer, collection_length).len());
    for_each_visible_item(buffer, measurement, collection_length, |it| out.push(it));
}

/// Resolves the clamped window and returns a fresh, ascending list of materialized items.
pub fn resolve_visible_items(
    buffer: BufferMeta,
    measurement: &ResizeMeasurement,
    collection_length: usize,
) -> Vec<InternalItem> {
    let mut out = Vec::new();
    collect_visible_items(buffer, measurement, collection_length, &mut out);
    out
}
