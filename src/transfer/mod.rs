//! The transfer unit: one URL to one file, one attempt per call.
//!
//! [`Transfer`] is the seam between the orchestrator and the network. It holds
//! no retry policy and no state across calls; calling it again after a
//! failure simply rewrites the destination from scratch.
//!
//! - [`http`] - [`HttpTransfer`], the streaming `reqwest` implementation

pub mod http;

pub use http::HttpTransfer;

use crate::download::{DownloadTarget, TransferOutcome};
use crate::progress::ProgressObserver;

use async_trait::async_trait;

/// Downloads a single target.
///
/// Implementations must only return [`TransferOutcome::Success`] once the
/// file is fully written and closed, and must leave no partial file behind
/// when returning [`TransferOutcome::Failed`].
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Make one attempt at `target`, reporting byte progress to `observer`.
    async fn transfer(
        &self,
        target: &DownloadTarget,
        observer: &dyn ProgressObserver,
    ) -> TransferOutcome;
}
