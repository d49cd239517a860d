use std::io;

/// Failures of the transport between the caller and a background engine.
///
/// Invalid inputs are not errors; they come back as [`crate::WindowResponse::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("worker thread is no longer running")]
    Disconnected,
    #[error("failed to spawn worker thread")]
    Spawn(#[source] io::Error),
    #[error("no submitted request is awaiting a response")]
    NothingPending,
    #[error("timed out waiting for a response")]
    Timeout,
    #[error("worker thread panicked")]
    Panicked,
}
