//! Terminal presentation of download events.
//!
//! [`ProgressDisplay`] subscribes to the orchestrator as a
//! [`ProgressObserver`] and renders a main bar over the first pass, a child
//! bar for the bytes of the current transfer, and status lines for skips,
//! failed attempts and retry rounds.
//!
//! ```rust
//! use harvester::progress::{DownloadEvent, ProgressDisplay, ProgressObserver, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden());
//! display.on_event(&DownloadEvent::BatchStarted { total: 3 });
//! assert_eq!(display.main().length(), Some(3));
//! ```

use super::event::{DownloadEvent, ProgressObserver};
use crate::progress::StyleOptions;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Progress display manager that renders [`DownloadEvent`]s.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// The main progress bar for the first pass.
    main: ProgressBar,
    /// Byte bar of the transfer in flight.
    child: Mutex<Option<ProgressBar>>,
    /// Style options for progress bars.
    style_options: StyleOptions,
    /// Set once the retry rounds start.
    in_rounds: AtomicBool,
}

impl ProgressDisplay {
    /// Create a new progress display manager.
    pub fn new(style_options: StyleOptions) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let main = multi.add(style_options.main().clone().to_progress_bar(Some(0)));

        Self {
            multi,
            main,
            child: Mutex::new(None),
            style_options,
            in_rounds: AtomicBool::new(false),
        }
    }

    /// Get the main progress bar.
    pub fn main(&self) -> &ProgressBar {
        &self.main
    }

    /// Print a line above the bars.
    fn println(&self, line: impl AsRef<str>) {
        // Drawing errors only affect presentation.
        let _ = self.multi.println(line);
    }

    fn update_child(&self, received: u64, total: Option<u64>) {
        let Ok(mut child) = self.child.lock() else {
            return;
        };
        let pb = child.get_or_insert_with(|| {
            self.multi
                .add(self.style_options.child().clone().to_progress_bar(total))
        });
        pb.set_position(received);
        if total.is_none() {
            pb.tick();
        }
    }

    fn finish_child(&self) {
        let Ok(mut child) = self.child.lock() else {
            return;
        };
        if let Some(pb) = child.take() {
            if self.style_options.child().clear {
                pb.finish_and_clear();
            } else {
                pb.finish();
            }
            self.multi.remove(&pb);
        }
    }

    fn finish_main(&self) {
        if self.main.is_finished() {
            return;
        }
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    fn first_pass(&self) -> bool {
        !self.in_rounds.load(Ordering::SeqCst)
    }
}

impl ProgressObserver for ProgressDisplay {
    fn on_event(&self, event: &DownloadEvent<'_>) {
        match event {
            DownloadEvent::BatchStarted { total } => {
                self.main.set_length(*total as u64);
                self.main.set_position(0);
            }
            DownloadEvent::ItemSkipped {
                index,
                total,
                target,
            } => {
                self.println(format!(
                    "[{}/{}] already downloaded: {}",
                    index,
                    total,
                    target.file_name()
                ));
                self.main.inc(1);
            }
            DownloadEvent::ItemStarted { target, .. } => {
                self.main.set_message(target.file_name().to_string());
            }
            DownloadEvent::Progress {
                received, total, ..
            } => self.update_child(*received, *total),
            DownloadEvent::TransferSucceeded { target } => {
                self.finish_child();
                self.println(format!("downloaded: {}", target.file_name()));
                if self.first_pass() {
                    self.main.inc(1);
                }
            }
            DownloadEvent::AttemptFailed {
                target,
                attempt,
                max_attempts,
                error,
            } => {
                self.finish_child();
                self.println(format!(
                    "attempt {}/{} failed for {}: {}",
                    attempt,
                    max_attempts,
                    target.file_name(),
                    error
                ));
            }
            DownloadEvent::AttemptsExhausted { .. } => {
                if self.first_pass() {
                    self.main.inc(1);
                }
            }
            DownloadEvent::RetryPhaseStarted { failed } => {
                self.in_rounds.store(true, Ordering::SeqCst);
                self.finish_main();
                self.println(format!(
                    "{} file(s) failed, starting retry rounds",
                    failed
                ));
            }
            DownloadEvent::RoundStarted {
                round,
                max_rounds,
                pending,
            } => self.println(format!(
                "retry round {}/{} for {} file(s)",
                round, max_rounds, pending
            )),
            DownloadEvent::RoundRetry {
                round,
                max_rounds,
                target,
            } => self.println(format!(
                "[{}] retry {}/{}: {}",
                target.sequence_index + 1,
                round,
                max_rounds,
                target.file_name()
            )),
            DownloadEvent::RoundWaiting { remaining, delay } => self.println(format!(
                "{} file(s) still failing, waiting {:.1}s before the next round",
                remaining,
                delay.as_secs_f64()
            )),
            DownloadEvent::BatchFinished { .. } => {
                self.finish_child();
                self.finish_main();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadTarget;
    use crate::error::TransferError;
    use std::path::Path;

    fn target() -> DownloadTarget {
        DownloadTarget::try_new("https://example.com/a.zip", Path::new("out"), 0).unwrap()
    }

    #[test]
    fn test_main_bar_counts_first_pass_items() {
        let display = ProgressDisplay::new(StyleOptions::hidden());
        let target = target();
        let error = TransferError::network("reset");

        display.on_event(&DownloadEvent::BatchStarted { total: 3 });
        display.on_event(&DownloadEvent::ItemSkipped {
            index: 1,
            total: 3,
            target: &target,
        });
        display.on_event(&DownloadEvent::TransferSucceeded { target: &target });
        display.on_event(&DownloadEvent::AttemptsExhausted {
            target: &target,
            error: &error,
        });
        assert_eq!(display.main().position(), 3);

        display.on_event(&DownloadEvent::RetryPhaseStarted { failed: 1 });
        display.on_event(&DownloadEvent::TransferSucceeded { target: &target });
        assert_eq!(display.main().position(), 3);
        assert!(display.main().is_finished());
    }

    #[test]
    fn test_child_bar_lifecycle() {
        let display = ProgressDisplay::new(StyleOptions::hidden());
        let target = target();

        display.on_event(&DownloadEvent::Progress {
            target: &target,
            received: 10,
            total: None,
        });
        assert!(display.child.lock().unwrap().is_some());

        display.on_event(&DownloadEvent::TransferSucceeded { target: &target });
        assert!(display.child.lock().unwrap().is_none());
    }
}
