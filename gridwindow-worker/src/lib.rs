//! Background offload for the `gridwindow` engine.
//!
//! Scroll and resize events fire at high frequency, and resolving a buffer window can touch
//! thousands of items. This crate moves that work off the UI thread while keeping the engine
//! itself pure:
//!
//! - Requests and responses are plain messages ([`WindowRequest`], [`WindowResponse`]) tagged
//!   with a monotonically increasing [`Sequence`]. There is no shared memory and no locking.
//! - [`StaleFilter`] drops any response whose sequence is not the latest issued, so an older
//!   scroll position can never overwrite a newer one.
//! - [`ResultCache`] is a bounded LRU owned by the executing side, keyed by normalized inputs.
//!
//! Two engines implement [`WindowEngine`]: [`InlineEngine`] computes on the calling thread,
//! [`WorkerEngine`] on a dedicated background thread. Both use the same [`dispatch`] function
//! and produce identical answers.
//!
//! Dispatched computations are never cancelled; superseded ones are simply ignored.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod cache;
mod dispatch;
mod engine;
mod error;
mod message;
mod options;
mod sequence;
mod worker;


pub use cache::{CacheStats, ResultCache};
pub use dispatch::{dispatch, validate};
pub use engine::{InlineEngine, WindowEngine};
pub use error::WorkerError;
pub use message::{Envelope, RejectReason, WindowRequest, WindowResponse};
pub use options::WorkerOptions;
pub use sequence::{Sequence, StaleFilter};
pub use worker::WorkerEngine;
