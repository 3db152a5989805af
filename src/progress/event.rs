//! Observable download events.
//!
//! The orchestrator and the transfer unit report what they are doing through a
//! [`ProgressObserver`]. Events are purely observational: nothing an observer
//! does changes control flow.
//!
//! Any `Fn(&DownloadEvent)` closure is an observer:
//!
//! ```rust
//! use harvester::progress::{DownloadEvent, ProgressObserver};
//!
//! let observer = |event: &DownloadEvent<'_>| {
//!     if let DownloadEvent::ItemSkipped { target, .. } = event {
//!         println!("skipped {}", target.file_name());
//!     }
//! };
//! observer.on_event(&DownloadEvent::BatchStarted { total: 0 });
//! ```

use crate::download::{BatchResult, DownloadTarget};
use crate::error::TransferError;

use std::time::Duration;

/// Something that happened during a batch run.
#[derive(Debug)]
pub enum DownloadEvent<'a> {
    /// The first pass is about to start.
    BatchStarted { total: usize },
    /// The file already existed; the target is left alone.
    ItemSkipped {
        index: usize,
        total: usize,
        target: &'a DownloadTarget,
    },
    /// The first pass is about to download a target.
    ItemStarted {
        index: usize,
        total: usize,
        target: &'a DownloadTarget,
    },
    /// Bytes arrived for the current transfer. `total` is `None` when the
    /// server did not announce a length.
    Progress {
        target: &'a DownloadTarget,
        received: u64,
        total: Option<u64>,
    },
    /// A transfer completed and the file is closed.
    TransferSucceeded { target: &'a DownloadTarget },
    /// One attempt failed; `attempt` counts from 1 up to `max_attempts`.
    AttemptFailed {
        target: &'a DownloadTarget,
        attempt: u32,
        max_attempts: u32,
        error: &'a TransferError,
    },
    /// All inline attempts for a target failed.
    AttemptsExhausted {
        target: &'a DownloadTarget,
        error: &'a TransferError,
    },
    /// Retry rounds are about to start for `failed` targets.
    RetryPhaseStarted { failed: usize },
    /// A retry round is starting.
    RoundStarted {
        round: u32,
        max_rounds: u32,
        pending: usize,
    },
    /// A target is retried within a round.
    RoundRetry {
        round: u32,
        max_rounds: u32,
        target: &'a DownloadTarget,
    },
    /// The orchestrator waits before the next round.
    RoundWaiting { remaining: usize, delay: Duration },
    /// The run is over.
    BatchFinished { result: &'a BatchResult },
}

/// Receives [`DownloadEvent`]s.
pub trait ProgressObserver: Send + Sync {
    /// Called for every event, in order.
    fn on_event(&self, event: &DownloadEvent<'_>);
}

impl<F> ProgressObserver for F
where
    F: Fn(&DownloadEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &DownloadEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &DownloadEvent<'_>) {}
}
