use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{
    CacheStats, Envelope, ResultCache, Sequence, StaleFilter, WindowEngine, WindowRequest,
    WindowResponse, WorkerError, WorkerOptions, dispatch,
};

/// Runs window computations on a dedicated background thread.
///
/// The thread owns its [`ResultCache`]; the two sides only exchange messages. Dropping the
/// engine closes the request channel and joins the thread.
#[derive(Debug)]
pub struct WorkerEngine {
    requests: Option<Sender<Envelope<WindowRequest>>>,
    responses: Receiver<Envelope<WindowResponse>>,
    thread: Option<JoinHandle<CacheStats>>,
    filter: StaleFilter,
}

impl WorkerEngine {
    pub fn spawn(options: WorkerOptions) -> Result<Self, WorkerError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let capacity = options.cache_capacity;

        let thread = thread::Builder::new()
            .name(options.thread_name.clone())
            .spawn(move || run(request_rx, response_tx, capacity))
            .map_err(WorkerError::Spawn)?;
        vdebug!(name = %options.thread_name, capacity, "spawned window worker");

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            thread: Some(thread),
            filter: StaleFilter::new(),
        })
    }

    /// Blocks until the response to the latest request arrives, discarding stale ones.
    ///
    /// Returns [`WorkerError::NothingPending`] without waiting when nothing was submitted or the
    /// latest response was already taken by [`WindowEngine::poll`].
    pub fn recv_latest(
        &mut self,
        timeout: Duration,
    ) -> Result<Envelope<WindowResponse>, WorkerError> {
        if !self.filter.is_awaiting() {
            return Err(WorkerError::NothingPending);
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(envelope) => {
                    if self.filter.accept(envelope.seq) {
                        return Ok(envelope);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(WorkerError::Timeout),
                Err(RecvTimeoutError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }

    /// Number of responses discarded as stale.
    pub fn dropped(&self) -> u64 {
        self.filter.dropped()
    }

    /// Stops the thread and returns the final cache statistics.
    pub fn shutdown(mut self) -> Result<CacheStats, WorkerError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<CacheStats, WorkerError> {
        self.requests.take();
        let Some(thread) = self.thread.take() else {
            return Err(WorkerError::Disconnected);
        };
        let stats = thread.join().map_err(|_| WorkerError::Panicked)?;
        vdebug!(
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "window worker stopped"
        );
        Ok(stats)
    }
}

impl WindowEngine for WorkerEngine {
    fn submit(&mut self, request: WindowRequest) -> Result<Sequence, WorkerError> {
        let requests = self.requests.as_ref().ok_or(WorkerError::Disconnected)?;
        let seq = self.filter.issue();
        requests
            .send(Envelope {
                seq,
                payload: request,
            })
            .map_err(|_| WorkerError::Disconnected)?;
        vtrace!(seq = seq.get(), "submitted window request");
        Ok(seq)
    }

    fn poll(&mut self) -> Result<Option<Envelope<WindowResponse>>, WorkerError> {
        loop {
            match self.responses.try_recv() {
                Ok(envelope) => {
                    if self.filter.accept(envelope.seq) {
                        return Ok(Some(envelope));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }
}

impl Drop for WorkerEngine {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.stop();
        }
    }
}

fn run(
    requests: Receiver<Envelope<WindowRequest>>,
    responses: Sender<Envelope<WindowResponse>>,
    capacity: usize,
) -> CacheStats {
    let mut cache = ResultCache::new(capacity);
    while let Ok(Envelope { seq, payload }) = requests.recv() {
        let payload = dispatch(&payload, &mut cache);
        if responses.send(Envelope { seq, payload }).is_err() {
            break;
        }
    }
    cache.stats()
}
