#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use harvester::download::{DownloadTarget, TransferOutcome};
use harvester::progress::{DownloadEvent, ProgressObserver};
use harvester::{Downloader, DownloaderBuilder, RetryPolicy, Transfer, TransferError};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use tempfile::TempDir;

// Common test constants
pub const TEST_BASE: &str = "https://example.com/files/";
pub const TEST_USER_AGENT: &str = "harvester-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// URLs under [`TEST_BASE`] for the given file names
pub fn create_test_urls(names: &[&str]) -> Vec<Url> {
    names
        .iter()
        .map(|name| Url::parse(&format!("{}{}", TEST_BASE, name)).expect("Invalid test URL"))
        .collect()
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

// === Scripted transfer unit ===

/// How the scripted transfer answers for one file name.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    /// Fail the first `n` calls, then succeed.
    FailTimes(usize),
    AlwaysFail,
}

/// Transfer stub that follows a per-file script and records every call.
///
/// Successful calls write `b"data"` to the destination.
#[derive(Default)]
pub struct ScriptedTransfer {
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(file_name.to_string(), behavior);
        self
    }

    /// Number of calls made for `file_name`
    pub fn calls_for(&self, file_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| *name == file_name)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// File names in call order
    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transfer for ScriptedTransfer {
    async fn transfer(
        &self,
        target: &DownloadTarget,
        observer: &dyn ProgressObserver,
    ) -> TransferOutcome {
        let name = target.file_name().to_string();
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(name.clone());
            calls.iter().filter(|c| **c == name).count()
        };

        let fail = match self.behaviors.get(&name).copied().unwrap_or(Behavior::Succeed) {
            Behavior::Succeed => false,
            Behavior::FailTimes(n) => call_number <= n,
            Behavior::AlwaysFail => true,
        };

        if fail {
            return TransferOutcome::Failed(TransferError::network(format!(
                "scripted failure #{}",
                call_number
            )));
        }

        observer.on_event(&DownloadEvent::Progress {
            target,
            received: 4,
            total: Some(4),
        });
        fs::write(&target.destination_path, b"data").expect("Failed to write scripted file");
        TransferOutcome::Success
    }
}

// === Event recording ===

/// Short textual form of an event, for order assertions
pub fn describe(event: &DownloadEvent<'_>) -> Option<String> {
    let line = match event {
        DownloadEvent::BatchStarted { total } => format!("batch:{}", total),
        DownloadEvent::ItemSkipped { target, .. } => format!("skip:{}", target.file_name()),
        DownloadEvent::ItemStarted { target, .. } => format!("start:{}", target.file_name()),
        DownloadEvent::Progress { .. } => return None,
        DownloadEvent::TransferSucceeded { target } => format!("ok:{}", target.file_name()),
        DownloadEvent::AttemptFailed {
            target,
            attempt,
            max_attempts,
            ..
        } => format!("fail:{}:{}/{}", target.file_name(), attempt, max_attempts),
        DownloadEvent::AttemptsExhausted { target, .. } => {
            format!("exhausted:{}", target.file_name())
        }
        DownloadEvent::RetryPhaseStarted { failed } => format!("phase:{}", failed),
        DownloadEvent::RoundStarted { round, pending, .. } => {
            format!("round:{}:{}", round, pending)
        }
        DownloadEvent::RoundRetry { round, target, .. } => {
            format!("retry:{}:{}", round, target.file_name())
        }
        DownloadEvent::RoundWaiting { remaining, .. } => format!("wait:{}", remaining),
        DownloadEvent::BatchFinished { .. } => "finished".to_string(),
    };
    Some(line)
}

/// Shared list of described events
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl ProgressObserver for EventLog {
    fn on_event(&self, event: &DownloadEvent<'_>) {
        if let Some(line) = describe(event) {
            self.0.lock().unwrap().push(line);
        }
    }
}

// === Downloader helpers ===

/// Downloader with no delays, the given retry budget and transfer stub
pub fn create_scripted_downloader(
    dir: &Path,
    max_retries: u32,
    transfer: Arc<ScriptedTransfer>,
    events: &EventLog,
) -> Downloader {
    DownloaderBuilder::new()
        .directory(dir.to_path_buf())
        .retry_policy(RetryPolicy::immediate(max_retries))
        .transfer(transfer)
        .observer(Arc::new(events.clone()))
        .build()
        .expect("Failed to build downloader")
}
