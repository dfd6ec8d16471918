//! Event sources feeding the view.
//!
//! - [`results_channel`]: the result stream the view subscribes to once
//! - [`script`]: NDJSON command scripts driving the CLI

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::debug;

pub mod script;

pub use script::{ScriptCommand, ScriptLine, ScriptReader};

/// A new result set was produced by the search pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsEvent {
    /// Query text the results were produced for.
    pub query_text: String,
    /// Total number of matching documents, when known.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl ResultsEvent {
    /// Event for `query_text` with an unknown total.
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            total_count: None,
        }
    }
}

/// Create a connected publisher / subscription pair.
pub fn results_channel() -> (ResultPublisher, Subscription) {
    let (sender, receiver) = mpsc::channel();
    (ResultPublisher { sender }, Subscription { receiver })
}

/// Publishing side of the result stream, held by the search pipeline.
#[derive(Debug, Clone)]
pub struct ResultPublisher {
    sender: Sender<ResultsEvent>,
}

impl ResultPublisher {
    /// Publish a result set.
    ///
    /// Returns `false` when the subscriber has been released; the event is
    /// dropped without error.
    pub fn publish(&self, event: ResultsEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(mpsc::SendError(event)) => {
                debug!(query = %event.query_text, "Result event dropped: subscriber released");
                false
            }
        }
    }
}

/// Subscribing side of the result stream.
///
/// Events are yielded in delivery order. Dropping the subscription releases
/// it; later publications become no-ops.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<ResultsEvent>,
}

impl Subscription {
    /// Next pending event, without blocking.
    ///
    /// Returns `None` when nothing is pending or every publisher is gone.
    pub fn try_next(&self) -> Option<ResultsEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// All currently pending events, in delivery order.
    pub fn drain(&self) -> Vec<ResultsEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
