use crate::{
    CacheStats, Envelope, ResultCache, Sequence, StaleFilter, WindowRequest, WindowResponse,
    WorkerError, WorkerOptions, dispatch,
};

/// Request/response execution of window computations.
///
/// `submit` never blocks on the computation. `poll` returns only the response to the most
/// recently submitted request; responses to superseded requests are discarded.
pub trait WindowEngine {
    fn submit(&mut self, request: WindowRequest) -> Result<Sequence, WorkerError>;

    fn poll(&mut self) -> Result<Option<Envelope<WindowResponse>>, WorkerError>;
}

/// Computes each request on the calling thread at submit time.
///
/// Useful where threads are unavailable, and as a reference for [`crate::WorkerEngine`].
/// At most one response is held: submitting discards the unpolled answer to the previous request.
#[derive(Debug)]
pub struct InlineEngine {
    cache: ResultCache,
    filter: StaleFilter,
    pending: Option<Envelope<WindowResponse>>,
}

impl InlineEngine {
    pub fn new(options: WorkerOptions) -> Self {
        Self {
            cache: ResultCache::new(options.cache_capacity),
            filter: StaleFilter::new(),
            pending: None,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of responses discarded as stale.
    pub fn dropped(&self) -> u64 {
        self.filter.dropped()
    }
}

impl Default for InlineEngine {
    fn default() -> Self {
        Self::new(WorkerOptions::default())
    }
}

impl WindowEngine for InlineEngine {
    fn submit(&mut self, request: WindowRequest) -> Result<Sequence, WorkerError> {
        let seq = self.filter.issue();
        if let Some(stale) = self.pending.take() {
            self.filter.accept(stale.seq);
        }
        let payload = dispatch(&request, &mut self.cache);
        self.pending = Some(Envelope { seq, payload });
        Ok(seq)
    }

    fn poll(&mut self) -> Result<Option<Envelope<WindowResponse>>, WorkerError> {
        Ok(self
            .pending
            .take()
            .filter(|envelope| self.filter.accept(envelope.seq)))
    }
}
