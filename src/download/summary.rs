//! Outcome types for transfers and batches.
//!
//! A [`TransferOutcome`] is produced for every attempt, a [`FailureRecord`]
//! tracks a target whose inline retries ran out, and the [`BatchResult`] is
//! computed once at the end of a run.
//!
//! # Examples
//!
//! ```rust
//! use harvester::download::{BatchResult, TransferOutcome, SkipReason};
//!
//! let outcome = TransferOutcome::Skipped(SkipReason::AlreadyExists);
//! assert!(!outcome.is_success());
//!
//! let result = BatchResult::new(3, 1, 4, Vec::new());
//! assert!(result.is_complete());
//! assert_eq!(result.success_rate(), 75.0);
//! ```

use super::target::DownloadTarget;
use crate::error::TransferError;

use std::fmt;

/// Why a target was not transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A file already exists at the destination path.
    AlreadyExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists => f.write_str("file already exists"),
        }
    }
}

/// Result of one attempt at a target.
#[derive(Debug)]
pub enum TransferOutcome {
    /// The file was fully written and closed.
    Success,
    /// Nothing was transferred.
    Skipped(SkipReason),
    /// The attempt failed; any partial file has been removed.
    Failed(TransferError),
}

impl TransferOutcome {
    /// Returns `true` for [`TransferOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success)
    }

    /// Returns `true` for [`TransferOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, TransferOutcome::Failed(_))
    }
}

/// A target whose inline retries were exhausted.
#[derive(Debug)]
pub struct FailureRecord {
    /// The failing target.
    pub target: DownloadTarget,
    /// The error of the most recent attempt.
    pub last_error: TransferError,
}

impl FailureRecord {
    /// Create a new [`FailureRecord`].
    pub fn new(target: DownloadTarget, last_error: TransferError) -> Self {
        Self { target, last_error }
    }
}

/// Final tally of a batch run.
///
/// Every target ends in exactly one of succeeded, skipped or terminally
/// failed.
#[derive(Debug)]
pub struct BatchResult {
    succeeded_count: usize,
    skipped_count: usize,
    total_count: usize,
    terminally_failed: Vec<FailureRecord>,
}

impl BatchResult {
    /// Create a new [`BatchResult`].
    pub fn new(
        succeeded_count: usize,
        skipped_count: usize,
        total_count: usize,
        terminally_failed: Vec<FailureRecord>,
    ) -> Self {
        Self {
            succeeded_count,
            skipped_count,
            total_count,
            terminally_failed,
        }
    }

    /// Targets downloaded during this run, including retry-round recoveries.
    pub fn succeeded_count(&self) -> usize {
        self.succeeded_count
    }

    /// Targets left alone because their file already existed.
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    /// Number of targets handed to the run.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of targets that exhausted every round.
    pub fn failed_count(&self) -> usize {
        self.terminally_failed.len()
    }

    /// Targets that exhausted every round.
    pub fn terminally_failed(&self) -> &[FailureRecord] {
        &self.terminally_failed
    }

    /// Whether the counts account for every target.
    pub fn is_complete(&self) -> bool {
        self.succeeded_count + self.skipped_count + self.failed_count() == self.total_count
    }

    /// Percentage of targets downloaded during this run, `0.0` for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.succeeded_count as f64 / self.total_count as f64 * 100.0
    }
}
