//! Tests for the downloader module functionality.
//!
//! This file contains tests for:
//! - Core Downloader getters
//! - DownloaderBuilder pattern
//! - RetryPolicy defaults

use harvester::downloader::{
    DownloaderBuilder, RetryPolicy, DEFAULT_DIRECTORY, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY, DEFAULT_RETRY_ROUND_DELAY,
};
use harvester::progress::DownloadEvent;
use harvester::Error;

use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let downloader = DownloaderBuilder::new().build().unwrap();

    assert_eq!(downloader.directory(), &PathBuf::from(DEFAULT_DIRECTORY));
    assert_eq!(downloader.retries(), DEFAULT_MAX_RETRIES);
    assert_eq!(downloader.retry_policy(), &RetryPolicy::default());
    assert_eq!(downloader.retry_policy().retry_delay, DEFAULT_RETRY_DELAY);
    assert_eq!(
        downloader.retry_policy().retry_round_delay,
        DEFAULT_RETRY_ROUND_DELAY
    );
    assert!(downloader.headers().is_none());
}

#[test]
fn test_retry_policy_defaults() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.retry_delay, Duration::from_millis(2000));
    assert_eq!(policy.retry_round_delay, Duration::from_millis(3000));
    assert_eq!(policy.max_attempts(), 4);

    let immediate = RetryPolicy::immediate(2);
    assert_eq!(immediate.retry_delay, Duration::ZERO);
    assert_eq!(immediate.retry_round_delay, Duration::ZERO);
}

#[test]
fn test_builder_configuration() {
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retries(5)
        .retry_delay(Duration::from_millis(10))
        .retry_round_delay(Duration::from_millis(20))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    assert_eq!(downloader.directory(), temp_dir.path());
    assert_eq!(downloader.retries(), 5);
    assert_eq!(
        downloader.retry_policy(),
        &RetryPolicy::new(5, Duration::from_millis(10), Duration::from_millis(20))
    );
}

#[test]
fn test_builder_headers() {
    let downloader = DownloaderBuilder::new()
        .headers(create_test_headers())
        .header(ACCEPT, HeaderValue::from_static("application/pdf"))
        .build()
        .unwrap();

    let headers = downloader.headers().unwrap();
    assert_eq!(headers.get(USER_AGENT).unwrap(), TEST_USER_AGENT);
    assert_eq!(headers.get(ACCEPT).unwrap(), "application/pdf");
}

#[test]
fn test_builder_single_header_overrides() {
    let downloader = DownloaderBuilder::new()
        .header(USER_AGENT, HeaderValue::from_static("first"))
        .header(USER_AGENT, HeaderValue::from_static("second"))
        .build()
        .unwrap();

    let headers = downloader.headers().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get(USER_AGENT).unwrap(), "second");
}

#[test]
fn test_downloader_debug() {
    let downloader = DownloaderBuilder::new().build().unwrap();
    let debug_str = format!("{:?}", downloader);

    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("config"));
    assert!(debug_str.contains("retry_policy"));
}

#[test]
fn test_downloader_clone() {
    let downloader = DownloaderBuilder::new().retries(7).build().unwrap();
    let cloned = downloader.clone();

    assert_eq!(cloned.retries(), 7);
    assert_eq!(cloned.directory(), downloader.directory());
}

#[tokio::test]
async fn test_builder_on_event_callback() {
    let temp_dir = create_temp_dir();
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retry_policy(RetryPolicy::immediate(0))
        .transfer(Arc::new(ScriptedTransfer::new()))
        .on_event(move |event| {
            if let DownloadEvent::TransferSucceeded { .. } = event {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            }
        })
        .build()
        .unwrap();

    let result = downloader
        .download_urls(&create_test_urls(&["one.zip", "two.zip"]))
        .await
        .unwrap();

    assert_eq!(result.succeeded_count(), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_builder_rejects_http_options_with_custom_transfer() {
    let with_headers = DownloaderBuilder::new()
        .headers(create_test_headers())
        .transfer(Arc::new(ScriptedTransfer::new()))
        .build();
    assert!(matches!(with_headers, Err(Error::Config(_))));

    let with_timeout = DownloaderBuilder::new()
        .transfer(Arc::new(ScriptedTransfer::new()))
        .connect_timeout(Duration::from_secs(5))
        .build();
    assert!(matches!(with_timeout, Err(Error::Config(_))));

    let plain = DownloaderBuilder::new()
        .transfer(Arc::new(ScriptedTransfer::new()))
        .build()
        .unwrap();
    assert!(plain.headers().is_none());
}
