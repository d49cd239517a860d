use gridwindow::{BufferMeta, InternalItem, ResizeMeasurement, SpaceAroundWindow, Viewport};

use crate::Sequence;

/// A unit of work for an engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowRequest {
    /// Compute the buffer window for a scroll position.
    BufferMeta {
        space: SpaceAroundWindow,
        measurement: ResizeMeasurement,
        multiplier: f64,
        viewport: Viewport,
    },
    /// Resolve and position the items of a known buffer window.
    Items {
        buffer: BufferMeta,
        measurement: ResizeMeasurement,
        collection_length: usize,
    },
    /// Both steps in one round trip.
    Window {
        space: SpaceAroundWindow,
        measurement: ResizeMeasurement,
        multiplier: f64,
        viewport: Viewport,
        collection_length: usize,
    },
}

impl WindowRequest {
    pub fn measurement(&self) -> &ResizeMeasurement {
        match self {
            Self::BufferMeta { measurement, .. }
            | Self::Items { measurement, .. }
            | Self::Window { measurement, .. } => measurement,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowResponse {
    BufferMeta(BufferMeta),
    Items(Vec<InternalItem>),
    Window {
        buffer: BufferMeta,
        items: Vec<InternalItem>,
    },
    /// The request did not meet the engine's preconditions and was not computed.
    Rejected(RejectReason),
}

/// Why a request was rejected before reaching the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    #[error("item sizes must be positive and gaps non-negative, with at least one row and column")]
    InvalidMeasurement,
    #[error("viewport dimensions must be positive")]
    InvalidViewport,
    #[error("multiplier must be positive")]
    InvalidMultiplier,
}

/// A message tagged with the sequence number of the request it belongs to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope<T> {
    pub seq: Sequence,
    pub payload: T,
}
