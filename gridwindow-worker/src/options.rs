/// Configuration shared by [`crate::InlineEngine`] and [`crate::WorkerEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Maximum number of cached results. `0` disables caching.
    pub cache_capacity: usize,
    /// Name given to the background thread.
    pub thread_name: String,
}

impl WorkerOptions {
    pub const DEFAULT_CACHE_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            thread_name: "gridwindow-worker".to_string(),
        }
    }
}
