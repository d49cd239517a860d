//! A headless virtual windowing engine for large scrollable grids and lists.
//!
//! For offloading the computation to a background thread (with sequenced requests and a
//! bounded result cache), see the `gridwindow-worker` crate.
//!
//! Rendering every item of a library with tens of thousands of entries is too expensive. This
//! crate answers, from plain numeric measurements, "which indices should be materialized and
//! where do they go":
//!
//! - [`compute_buffer_meta`]: the over-provisioned index window around the viewport.
//! - [`resolve_window`] / [`resolve_visible_items`]: the clamped slice and each item's offset.
//! - [`compute_content_size`]: the scrollable extent along the scroll axis.
//! - [`compute_scroll_target`]: absolute scroll coordinates that bring an index into view.
//!
//! It is UI-agnostic. The host is expected to provide:
//! - a grid measurement (gaps, flow, track counts) and one item's box size
//! - viewport size and the scroll distance already consumed before it
//! - the collection length
//!
//! All four functions are pure. [`GridWindow`] is an optional stateful wrapper that keeps the
//! latest inputs and memoizes the buffer window between frames.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("gridwindow requires either the `std` or the `libm` feature");

#[macro_use]
mod macros;

mod buffer;
mod content;
mod math;
mod measurement;
mod options;
mod resolve;
mod scroll;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use buffer::{compute_buffer_meta, compute_buffer_meta_for};
pub use content::compute_content_size;
pub use measurement::GridMeasurementSource;
pub use options::{GridWindowOptions, OnChangeCallback};
pub use resolve::{
    collect_visible_items, for_each_visible_item, for_each_visible_offset, offset_by_index,
    resolve_visible_items, resolve_window,
};
pub use scroll::{
    GridElementGeometry, ScrollParentGeometry, ScrollParentLocator, ScrollParents,
    compute_scroll_target, compute_scroll_target_with,
};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{
    BufferMeta, ContentSize, Flow, GridMeasurement, InternalItem, ItemBox, ItemOffset, ItemStyle,
    ResizeMeasurement, ScrollAxis, ScrollTarget, SpaceAroundWindow, Viewport, VisibleWindow,
};
pub use window::GridWindow;
