use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::{
    BufferMeta, ContentSize, FrameState, GridElementGeometry, GridWindowOptions, InternalItem,
    ItemOffset, ResizeMeasurement, ScrollParents, ScrollState, ScrollTarget, SpaceAroundWindow,
    Viewport, ViewportState, VisibleWindow, collect_visible_items, compute_buffer_meta_for,
    compute_content_size, compute_scroll_target, for_each_visible_item, offset_by_index,
    resolve_window,
};

/// A stateful wrapper over the pure windowing functions.
///
/// This type holds no UI objects. Your adapter drives it with measurements, viewport sizes and
/// scroll distances, and reads back the buffer window and materialized items. The buffer
/// window is memoized until one of its inputs changes.
#[derive(Clone, Debug)]
pub struct GridWindow {
    options: GridWindowOptions,
    viewport: Viewport,
    space: SpaceAroundWindow,
    is_scrolling: bool,

    buffer: Cell<Option<BufferMeta>>,

    /// Nesting depth of `batch_update` scopes.
    batch_depth: usize,
    /// Set when a change happened inside a batch and `on_change` is still owed.
    batch_changed: bool,
}

/// What a state update touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Change {
    /// An input of the buffer window; the memo must be recomputed.
    BufferInput,
    /// Anything else (collection length, scrolling flag).
    Other,
}

impl GridWindow {
    /// Creates a new window from options, applying `initial_viewport` and `initial_space`.
    pub fn new(options: GridWindowOptions) -> Self {
        vdebug!(
            count = options.count,
            multiplier = options.multiplier,
            enabled = options.enabled,
            "GridWindow::new"
        );
        Self {
            viewport: options.initial_viewport.unwrap_or_default(),
            space: options.initial_space,
            is_scrolling: false,
            buffer: Cell::new(None),
            options,
            batch_depth: 0,
            batch_changed: false,
        }
    }

    pub fn options(&self) -> &GridWindowOptions {
        &self.options
    }

    fn reset_to_initial(&mut self) {
        self.viewport = self.options.initial_viewport.unwrap_or_default();
        self.space = self.options.initial_space;
        self.is_scrolling = false;
    }

    pub fn set_options(&mut self, options: GridWindowOptions) {
        let was_enabled = self.options.enabled;
        self.options = options;
        vdebug!(
            count = self.options.count,
            multiplier = self.options.multiplier,
            enabled = self.options.enabled,
            "GridWindow::set_options"
        );

        if !self.options.enabled || !was_enabled {
            self.reset_to_initial();
        }
        self.record(Change::BufferInput);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut GridWindowOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&GridWindow, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Records a state update: drops the memoized buffer if needed, then fires `on_change`
    /// now or, inside `batch_update`, once when the outermost batch ends.
    fn record(&mut self, change: Change) {
        if change == Change::BufferInput {
            self.buffer.set(None);
        }
        if self.batch_depth > 0 {
            self.batch_changed = true;
        } else {
            self.emit_change();
        }
    }

    fn emit_change(&self) {
        if let Some(on_change) = &self.options.on_change {
            on_change(self, self.is_scrolling);
        }
    }

    /// Runs `f` as one state update: however many setters it calls, `on_change` fires at most
    /// once, after `f` returns. Batches nest.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;

        if self.batch_depth == 0 && core::mem::take(&mut self.batch_changed) {
            self.emit_change();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Sets the collection length. The buffer window does not depend on it and stays memoized.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.record(Change::Other);
    }

    pub fn multiplier(&self) -> f64 {
        self.options.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        if self.options.multiplier == multiplier {
            return;
        }
        self.options.multiplier = multiplier;
        self.record(Change::BufferInput);
    }

    pub fn measurement(&self) -> Option<&ResizeMeasurement> {
        self.options.measurement.as_ref()
    }

    pub fn set_measurement(&mut self, measurement: Option<ResizeMeasurement>) {
        if self.options.measurement == measurement {
            return;
        }
        self.options.measurement = measurement;
        self.record(Change::BufferInput);
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.reset_to_initial();
        self.record(Change::BufferInput);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.record(Change::BufferInput);
    }

    pub fn space(&self) -> SpaceAroundWindow {
        self.space
    }

    pub fn set_space(&mut self, space: SpaceAroundWindow) {
        if self.space == space {
            return;
        }
        self.space = space;
        self.record(Change::BufferInput);
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        self.record(Change::Other);
    }

    /// Applies a viewport + scroll space update from your UI layer in a single coalesced
    /// update, and marks the window as scrolling.
    pub fn apply_scroll_frame(&mut self, viewport: Viewport, space: SpaceAroundWindow) {
        vtrace!(
            width = viewport.width,
            height = viewport.height,
            left = space.left,
            top = space.top,
            "apply_scroll_frame"
        );
        self.batch_update(|w| {
            w.set_viewport(viewport);
            w.set_space(space);
            w.set_is_scrolling(true);
        });
    }

    fn usable_measurement(&self) -> Option<&ResizeMeasurement> {
        if !self.options.enabled {
            return None;
        }
        self.options.measurement.as_ref().filter(|m| m.is_valid())
    }

    /// Returns the buffer window for the current inputs.
    ///
    /// Returns `None` while disabled, unmeasured, or when the viewport or multiplier do not
    /// meet the engine's preconditions.
    pub fn buffer_meta(&self) -> Option<BufferMeta> {
        if let Some(cached) = self.buffer.get() {
            return Some(cached);
        }
        let measurement = self.usable_measurement()?;
        let multiplier = self.options.multiplier;
        if !self.viewport.is_valid() || !multiplier.is_finite() || multiplier <= 0.0 {
            return None;
        }
        let meta = compute_buffer_meta_for(self.space, measurement, multiplier, self.viewport);
        self.buffer.set(Some(meta));
        Some(meta)
    }

    /// Returns the clamped slice to materialize (empty when no buffer window is available).
    pub fn visible_window(&self) -> VisibleWindow {
        match self.buffer_meta() {
            Some(buffer) => resolve_window(buffer, self.options.count),
            None => VisibleWindow::default(),
        }
    }

    pub fn for_each_visible_item(&self, f: impl FnMut(InternalItem)) {
        let (Some(buffer), Some(measurement)) = (self.buffer_meta(), self.usable_measurement())
        else {
            return;
        };
        for_each_visible_item(buffer, measurement, self.options.count, f);
    }

    /// Collects the materialized items into `out` (clears `out` first).
    pub fn collect_visible_items(&self, out: &mut Vec<InternalItem>) {
        out.clear();
        let (Some(buffer), Some(measurement)) = (self.buffer_meta(), self.usable_measurement())
        else {
            return;
        };
        collect_visible_items(buffer, measurement, self.options.count, out);
    }

    pub fn visible_items(&self) -> Vec<InternalItem> {
        let mut out = Vec::new();
        self.collect_visible_items(&mut out);
        out
    }

    pub fn content_size(&self) -> Option<ContentSize> {
        let measurement = self.usable_measurement()?;
        Some(compute_content_size(measurement, self.options.count))
    }

    /// Returns the offset of `index`, or `None` when it is out of bounds or unmeasured.
    pub fn offset_of(&self, index: usize) -> Option<ItemOffset> {
        let measurement = self.usable_measurement()?;
        (index < self.options.count).then(|| offset_by_index(index, measurement))
    }

    /// Computes the scroll coordinates for `index`, clamped to the last item.
    pub fn scroll_target(
        &self,
        scroll_parents: &ScrollParents,
        grid: &GridElementGeometry,
        index: usize,
    ) -> Option<ScrollTarget> {
        let measurement = self.usable_measurement()?;
        if self.options.count == 0 {
            return None;
        }
        let index = index.min(self.options.count - 1);
        Some(compute_scroll_target(
            scroll_parents,
            grid,
            measurement,
            index,
        ))
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            viewport: self.viewport,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            space: self.space,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport + scroll state from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|w| {
            w.set_viewport(frame.viewport.viewport);
            w.set_space(frame.scroll.space);
            w.set_is_scrolling(frame.scroll.is_scrolling);
        });
    }
}
