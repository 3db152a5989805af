//! Batch orchestration with inline retries and retry rounds.
//!
//! A batch runs in two phases, strictly one transfer at a time:
//!
//! 1. The first pass walks the targets in order. Targets whose file already
//!    exists are skipped; every other target gets an inline retry invocation
//!    ([`Downloader::attempt_with_retry`]). Exhausted targets become
//!    [`FailureRecord`]s.
//! 2. Retry rounds ([`Downloader::run_retry_rounds`]) sweep the failures again,
//!    each target getting a fresh inline budget. Rounds are barriers: round
//!    `n` finishes before round `n + 1` starts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use harvester::downloader::DownloaderBuilder;
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build()?;
//! let urls = vec![
//!     Url::parse("https://example.com/file1.zip")?,
//!     Url::parse("https://example.com/file2.pdf")?,
//! ];
//!
//! let result = downloader.download_urls(&urls).await?;
//! println!("{}/{} downloaded", result.succeeded_count(), result.total_count());
//! # Ok(())
//! # }
//! ```

use super::config::{DownloaderConfig, RetryPolicy};
use crate::download::{BatchResult, DownloadTarget, FailureRecord, TransferOutcome};
use crate::error::{Result, TransferError};
use crate::progress::{DownloadEvent, NoopObserver, ProgressObserver};
use crate::transfer::Transfer;

use reqwest::{header::HeaderMap, Url};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::{fs, time::sleep};
use tracing::{debug, info, warn};

/// Result of one inline retry invocation.
#[derive(Debug)]
pub enum AttemptResult {
    /// One of the attempts succeeded.
    Success,
    /// Every attempt failed; carries the last error.
    Exhausted(TransferError),
}

impl AttemptResult {
    /// Returns `true` for [`AttemptResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success)
    }
}

/// Tally of the first pass.
#[derive(Debug, Default)]
pub struct FirstPass {
    /// Targets downloaded.
    pub succeeded_count: usize,
    /// Targets whose file already existed.
    pub skipped_count: usize,
    /// Targets whose inline retries ran out, in input order.
    pub failures: Vec<FailureRecord>,
}

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), harvester::Error> {
/// use harvester::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    transfer: Arc<dyn Transfer>,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig, transfer: Arc<dyn Transfer>) -> Self {
        Self { config, transfer }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.config.retry_policy
    }

    /// Gets the number of retries.
    pub fn retries(&self) -> u32 {
        self.config.retry_policy.max_retries
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    fn observer(&self) -> &dyn ProgressObserver {
        match self.config.observer {
            Some(ref observer) => observer.as_ref(),
            None => &NoopObserver,
        }
    }

    fn emit(&self, event: DownloadEvent<'_>) {
        self.observer().on_event(&event);
    }

    /// Map discovered URLs to targets inside the output directory.
    pub fn targets(&self, urls: &[Url]) -> Vec<DownloadTarget> {
        urls.iter()
            .enumerate()
            .map(|(index, url)| DownloadTarget::new(url, &self.config.directory, index))
            .collect()
    }

    /// Create the output directory if it does not exist yet.
    pub async fn prepare_directory(&self) -> Result<()> {
        let directory = &self.config.directory;
        if !fs::try_exists(directory).await.unwrap_or(false) {
            info!("Creating output directory {:?}", directory);
        }
        fs::create_dir_all(directory).await?;
        Ok(())
    }

    /// Prepare the output directory, then download every URL.
    pub async fn download_urls(&self, urls: &[Url]) -> Result<BatchResult> {
        self.prepare_directory().await?;
        let targets = self.targets(urls);
        Ok(self.download(&targets).await)
    }

    /// Run the first pass and the retry rounds over `targets`.
    ///
    /// The parent directory of every destination must already exist.
    pub async fn download(&self, targets: &[DownloadTarget]) -> BatchResult {
        let total = targets.len();
        info!(total, "Starting downloads");
        self.emit(DownloadEvent::BatchStarted { total });

        let first_pass = self.run_first_pass(targets).await;
        let failed_after_first_pass = first_pass.failures.len();

        let terminal = self.run_retry_rounds(first_pass.failures).await;
        let recovered = failed_after_first_pass - terminal.len();

        let result = BatchResult::new(
            first_pass.succeeded_count + recovered,
            first_pass.skipped_count,
            total,
            terminal,
        );
        info!(
            succeeded = result.succeeded_count(),
            skipped = result.skipped_count(),
            failed = result.failed_count(),
            total,
            "Downloads finished"
        );
        self.emit(DownloadEvent::BatchFinished { result: &result });

        result
    }

    /// Walk `targets` once, in order.
    pub async fn run_first_pass(&self, targets: &[DownloadTarget]) -> FirstPass {
        let total = targets.len();
        let mut pass = FirstPass::default();

        for (position, target) in targets.iter().enumerate() {
            let index = position + 1;

            if fs::try_exists(&target.destination_path).await.unwrap_or(false) {
                debug!(path = %target.destination_path.display(), "File already downloaded");
                self.emit(DownloadEvent::ItemSkipped {
                    index,
                    total,
                    target,
                });
                pass.skipped_count += 1;
                continue;
            }

            self.emit(DownloadEvent::ItemStarted {
                index,
                total,
                target,
            });

            match self
                .attempt_with_retry(target, self.config.retry_policy.max_retries)
                .await
            {
                AttemptResult::Success => pass.succeeded_count += 1,
                AttemptResult::Exhausted(error) => {
                    pass.failures.push(FailureRecord::new(target.clone(), error))
                }
            }
        }

        pass
    }

    /// Try `target` up to `1 + max_retries` times, waiting the retry delay
    /// between attempts.
    pub async fn attempt_with_retry(&self, target: &DownloadTarget, max_retries: u32) -> AttemptResult {
        let max_attempts = max_retries.saturating_add(1);
        let mut attempt: u32 = 1;

        loop {
            match self.transfer.transfer(target, self.observer()).await {
                TransferOutcome::Success => {
                    self.emit(DownloadEvent::TransferSucceeded { target });
                    return AttemptResult::Success;
                }
                TransferOutcome::Skipped(reason) => {
                    debug!(path = %target.destination_path.display(), %reason, "Transfer skipped");
                    return AttemptResult::Success;
                }
                TransferOutcome::Failed(error) => {
                    self.emit(DownloadEvent::AttemptFailed {
                        target,
                        attempt,
                        max_attempts,
                        error: &error,
                    });

                    if attempt >= max_attempts {
                        warn!(
                            url = %target.source_url,
                            attempts = attempt,
                            %error,
                            "Giving up on target for now"
                        );
                        self.emit(DownloadEvent::AttemptsExhausted {
                            target,
                            error: &error,
                        });
                        return AttemptResult::Exhausted(error);
                    }

                    debug!(
                        url = %target.source_url,
                        attempt,
                        max_attempts,
                        %error,
                        "Attempt failed, retrying"
                    );
                    sleep(self.config.retry_policy.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Sweep `failures` in rounds until they all recover or the round budget
    /// runs out. Returns the terminal failures.
    pub async fn run_retry_rounds(&self, failures: Vec<FailureRecord>) -> Vec<FailureRecord> {
        if failures.is_empty() {
            return failures;
        }

        let policy = self.config.retry_policy;
        let max_rounds = policy.max_retries;
        info!(failed = failures.len(), max_rounds, "Starting retry rounds");
        self.emit(DownloadEvent::RetryPhaseStarted {
            failed: failures.len(),
        });

        let mut pending = failures;
        let mut round: u32 = 1;

        while !pending.is_empty() && round <= max_rounds {
            info!(round, max_rounds, pending = pending.len(), "Retry round");
            self.emit(DownloadEvent::RoundStarted {
                round,
                max_rounds,
                pending: pending.len(),
            });

            let mut still_failed = Vec::new();
            for record in pending {
                self.emit(DownloadEvent::RoundRetry {
                    round,
                    max_rounds,
                    target: &record.target,
                });

                match self
                    .attempt_with_retry(&record.target, policy.max_retries)
                    .await
                {
                    AttemptResult::Success => {
                        info!(url = %record.target.source_url, round, "Recovered")
                    }
                    AttemptResult::Exhausted(error) => {
                        still_failed.push(FailureRecord::new(record.target, error))
                    }
                }
            }
            pending = still_failed;

            if !pending.is_empty() && round < max_rounds {
                self.emit(DownloadEvent::RoundWaiting {
                    remaining: pending.len(),
                    delay: policy.retry_round_delay,
                });
                sleep(policy.retry_round_delay).await;
            }
            round += 1;
        }

        pending
    }
}
