//! Streaming HTTP(S) transfer.
//!
//! [`HttpTransfer`] performs one GET per call and streams the body straight to
//! the destination path. A broken stream or a failed write removes the
//! partial file before the failure is reported.

use super::Transfer;
use crate::download::{DownloadTarget, TransferOutcome};
use crate::error::TransferError;
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::{DownloadEvent, ProgressObserver};
use crate::utils::{content_length_from_headers, progress_percent};

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest_middleware::ClientWithMiddleware;
use std::io::ErrorKind;
use std::path::Path;
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::{debug, trace, warn};

/// Transfer unit backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: ClientWithMiddleware,
}

impl HttpTransfer {
    /// Creates a transfer unit using `client`.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Creates a transfer unit with a client built from `config`.
    pub fn from_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(create_http_client(config)?))
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    async fn fetch(
        &self,
        target: &DownloadTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<u64, TransferError> {
        debug!(url = %target.source_url, "Fetching");
        let res = self.client.get(target.source_url.as_str()).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(TransferError::HttpStatus { status });
        }

        let total = content_length_from_headers(res.headers());
        let stream = res
            .bytes_stream()
            .map(|item| item.map_err(TransferError::from));

        write_stream(stream, target, total, observer).await
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn transfer(
        &self,
        target: &DownloadTarget,
        observer: &dyn ProgressObserver,
    ) -> TransferOutcome {
        match self.fetch(target, observer).await {
            Ok(size) => {
                debug!(path = %target.destination_path.display(), size, "Transfer complete");
                TransferOutcome::Success
            }
            Err(error) => {
                debug!(url = %target.source_url, %error, "Transfer failed");
                TransferOutcome::Failed(error)
            }
        }
    }
}

/// Write `stream` to the target's destination, reporting progress per chunk.
///
/// Returns the number of bytes written once the file is synced and closed.
/// On error the destination file is removed.
pub(crate) async fn write_stream<S, B>(
    stream: S,
    target: &DownloadTarget,
    total: Option<u64>,
    observer: &dyn ProgressObserver,
) -> Result<u64, TransferError>
where
    S: Stream<Item = Result<B, TransferError>>,
    B: AsRef<[u8]>,
{
    let path = target.destination_path.as_path();
    let result = copy_to_file(stream, target, total, observer).await;
    if result.is_err() {
        remove_partial(path).await;
    }
    result
}

async fn copy_to_file<S, B>(
    stream: S,
    target: &DownloadTarget,
    total: Option<u64>,
    observer: &dyn ProgressObserver,
) -> Result<u64, TransferError>
where
    S: Stream<Item = Result<B, TransferError>>,
    B: AsRef<[u8]>,
{
    let path = target.destination_path.as_path();
    debug!("Creating destination file {:?}", path);
    let mut file = File::create(path)
        .await
        .map_err(|e| TransferError::filesystem(path, e))?;

    let mut stream = std::pin::pin!(stream);
    let mut received: u64 = 0;
    while let Some(item) = stream.next().await {
        let chunk = item?;
        let bytes = chunk.as_ref();
        file.write_all(bytes)
            .await
            .map_err(|e| TransferError::filesystem(path, e))?;

        received += bytes.len() as u64;
        trace!(received, percent = ?progress_percent(received, total), "Chunk written");
        observer.on_event(&DownloadEvent::Progress {
            target,
            received,
            total,
        });
    }

    file.flush()
        .await
        .map_err(|e| TransferError::filesystem(path, e))?;
    file.sync_all()
        .await
        .map_err(|e| TransferError::filesystem(path, e))?;
    drop(file);

    Ok(received)
}

/// Best-effort removal of a partially written file.
async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial file {:?}", path),
        Err(e) if e.kind() == ErrorKind::NotFound => (),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove partial file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::Mutex;

    fn target_in(dir: &Path, name: &str) -> DownloadTarget {
        DownloadTarget::try_new(&format!("https://example.com/{}", name), dir, 0).unwrap()
    }

    #[tokio::test]
    async fn test_write_stream_success_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(dir.path(), "data.bin");
        let seen = Mutex::new(Vec::new());
        let observer = |event: &DownloadEvent<'_>| {
            if let DownloadEvent::Progress {
                received, total, ..
            } = event
            {
                seen.lock().unwrap().push((*received, *total));
            }
        };

        let chunks = stream::iter(vec![
            Ok::<_, TransferError>(b"hello ".to_vec()),
            Ok(b"world".to_vec()),
        ]);
        let written = write_stream(chunks, &target, Some(11), &observer)
            .await
            .unwrap();

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&target.destination_path).unwrap(), b"hello world");
        assert_eq!(*seen.lock().unwrap(), vec![(6, Some(11)), (11, Some(11))]);
    }

    #[tokio::test]
    async fn test_write_stream_unknown_total() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(dir.path(), "data.bin");
        let seen = Mutex::new(Vec::new());
        let observer = |event: &DownloadEvent<'_>| {
            if let DownloadEvent::Progress { total, .. } = event {
                seen.lock().unwrap().push(*total);
            }
        };

        let chunks = stream::iter(vec![Ok::<_, TransferError>(vec![0u8; 16])]);
        write_stream(chunks, &target, None, &observer).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_write_stream_drop_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(dir.path(), "broken.zip");

        let chunks = stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err(TransferError::network("connection reset by peer")),
        ]);
        let result = write_stream(chunks, &target, Some(1000), &crate::progress::NoopObserver).await;

        assert!(matches!(result, Err(TransferError::Network(_))));
        assert!(!target.destination_path.exists());
    }

    #[tokio::test]
    async fn test_write_stream_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(dir.path(), "doc.pdf");
        std::fs::write(&target.destination_path, b"stale content that is longer").unwrap();

        let chunks = stream::iter(vec![Ok::<_, TransferError>(b"fresh".to_vec())]);
        write_stream(chunks, &target, None, &crate::progress::NoopObserver)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&target.destination_path).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_write_stream_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(&dir.path().join("missing"), "a.mp3");

        let chunks = stream::iter(vec![Ok::<_, TransferError>(b"x".to_vec())]);
        let result = write_stream(chunks, &target, None, &crate::progress::NoopObserver).await;

        assert!(matches!(result, Err(TransferError::Filesystem { .. })));
    }
}
