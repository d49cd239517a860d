use crate::math::{ceil, round_half_up, to_count};
use crate::{BufferMeta, ResizeMeasurement, SpaceAroundWindow, Viewport};

/// Computes the index window that should have materialized nodes.
///
/// The window covers the lines intersecting the viewport, scaled by `multiplier` and
/// over-provisioned four times, centered on the first visible line. Near the start the offset
/// clamps at 0. The window is not clamped to the collection length; see
/// [`crate::resolve_window`].
///
/// Preconditions (checked in debug builds only): `measurement.is_valid()`, `multiplier > 0`, and
/// positive viewport dimensions. Degenerate inputs produce meaningless numbers, not panics.
pub fn compute_buffer_meta(
    space: SpaceAroundWindow,
    measurement: &ResizeMeasurement,
    multiplier: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> BufferMeta {
    compute_buffer_meta_for(
        space,
        measurement,
        multiplier,
        Viewport::new(viewport_width, viewport_height),
    )
}

/// Same as [`compute_buffer_meta`], taking the viewport as a [`Viewport`].
pub fn compute_buffer_meta_for(
    space: SpaceAroundWindow,
    measurement: &ResizeMeasurement,
    multiplier: f64,
    viewport: Viewport,
) -> BufferMeta {
    debug_assert!(
        measurement.is_valid(),
        "compute_buffer_meta: invalid measurement {measurement:?}"
    );
    debug_assert!(
        multiplier > 0.0,
        "compute_buffer_meta: multiplier must be positive (got {multiplier})"
    );

    let flow = measurement.flow();
    let crosswise_lines = measurement.crosswise_lines();
    let gap = measurement.scroll_gap();
    let item_size = measurement.scroll_item_size();
    let viewport_size = viewport.along(flow);
    let space_behind = space.behind(flow);

    let lines_in_view = to_count(round_half_up((viewport_size + gap) / item_size));
    let lines_before = to_count(ceil((space_behind + gap) / item_size));

    let items_before = lines_before.saturating_mul(crosswise_lines);
    let items_intersecting_viewport = lines_in_view.saturating_mul(crosswise_lines);

    let intersecting = items_intersecting_viewport as f64;
    let scaled = intersecting * multiplier;
    // Evaluated in floating point so fractional multipliers see the same even/odd rule.
    // The odd branch yields an odd count; kept as-is for compatibility with existing hosts.
    let rendered = if scaled % 2.0 == 0.0 {
        scaled * 4.0
    } else {
        scaled * 4.0 + 1.0
    };
    // Multipliers below 0.25 would otherwise shrink the buffer under the visible count.
    let rendered = rendered.max(intersecting);

    let half_around = round_half_up((rendered - intersecting) / 2.0);
    let buffered_offset = items_before.saturating_sub(to_count(half_around));
    // Items are materialized while `index < offset + rendered`, so a fractional tail counts.
    let rendered_items = to_count(ceil(rendered)).max(items_intersecting_viewport);

    vtrace!(
        lines_in_view,
        lines_before,
        items_intersecting_viewport,
        buffered_offset,
        buffered_length = rendered_items,
        "compute_buffer_meta"
    );

    BufferMeta {
        buffered_offset,
        buffered_length: rendered_items,
    }
}
