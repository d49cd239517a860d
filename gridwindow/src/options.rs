use alloc::sync::Arc;

use crate::window::GridWindow;
use crate::{ResizeMeasurement, SpaceAroundWindow, Viewport};

/// A callback fired when a [`GridWindow`] state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&GridWindow, bool) + Send + Sync>;

/// Configuration for [`crate::GridWindow`].
///
/// Cheap to clone: the callback lives in an `Arc`, so adapters can tweak a field and call
/// `GridWindow::set_options` without reallocating closures.
#[derive(Clone)]
pub struct GridWindowOptions {
    /// Collection length.
    pub count: usize,

    /// Over-provisioning multiplier applied to the number of items intersecting the viewport.
    pub multiplier: f64,

    /// The latest resize measurement. Queries return `None` until one is provided.
    pub measurement: Option<ResizeMeasurement>,

    /// The initial viewport size (before the first resize event).
    pub initial_viewport: Option<Viewport>,

    /// The initial scroll distance consumed before the viewport.
    pub initial_space: SpaceAroundWindow,

    /// Enables/disables the window. When disabled, query methods return empty results.
    pub enabled: bool,

    /// Optional callback fired when the window's inputs change.
    pub on_change: Option<OnChangeCallback>,
}

impl GridWindowOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            multiplier: 1.0,
            measurement: None,
            initial_viewport: None,
            initial_space: SpaceAroundWindow::default(),
            enabled: true,
            on_change: None,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_measurement(mut self, measurement: Option<ResizeMeasurement>) -> Self {
        self.measurement = measurement;
        self
    }

    pub fn with_initial_viewport(mut self, viewport: Option<Viewport>) -> Self {
        self.initial_viewport = viewport;
        self
    }

    pub fn with_initial_space(mut self, space: SpaceAroundWindow) -> Self {
        self.initial_space = space;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&GridWindow, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for GridWindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridWindowOptions")
            .field("count", &self.count)
            .field("multiplier", &self.multiplier)
            .field("measurement", &self.measurement)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_space", &self.initial_space)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
