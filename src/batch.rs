//! Sequential batch orchestration over the transfer engine.
//!
//! A batch is processed strictly one transfer at a time: the next transfer
//! does not begin until the previous one has fully settled. Individual
//! failures never abort the batch; callers always get one outcome per
//! request, in input order.

use tracing::{info, instrument};

use crate::transfer::{DownloadOutcome, DownloadRequest, TransferEngine};

/// One entry of a batch: where to fetch from and where to put it.
///
/// Sequence numbers are not part of a batch entry: the orchestrator assigns
/// 1-based numbers in input order for progress display, regardless of any
/// numbering the caller has.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Source URL to fetch.
    pub url: String,
    /// Destination directory; empty means the current working directory.
    pub directory: String,
    /// Desired destination file name, before collision resolution.
    pub file_name: String,
}

impl BatchRequest {
    /// Creates a batch entry.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        directory: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }
}

impl TransferEngine {
    /// Downloads a batch of URLs sequentially, returning one outcome per
    /// request in input order.
    ///
    /// Failures are recorded and the batch moves on; a closing summary is
    /// logged with the aggregate counts.
    #[instrument(skip(self, requests), fields(total = requests.len()))]
    pub async fn download_many(&mut self, requests: &[BatchRequest]) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for (index, entry) in requests.iter().enumerate() {
            let request = DownloadRequest::new(entry.url.clone())
                .with_directory(entry.directory.clone())
                .with_file_name(entry.file_name.clone())
                .with_sequence_number(index + 1);
            outcomes.push(self.download_one(&request).await);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            total = outcomes.len(),
            succeeded,
            failed = outcomes.len() - succeeded,
            "batch complete"
        );
        outcomes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::progress::{ProgressRender, ProgressSnapshot, RenderError};
    use crate::test_support::http::MockHttp;
    use crate::transfer::ErrorKind;
    use tempfile::TempDir;

    /// Records the display index of every started transfer.
    #[derive(Clone, Default)]
    struct IndexRender {
        starts: Arc<Mutex<Vec<usize>>>,
    }

    impl ProgressRender for IndexRender {
        fn start(&mut self, snapshot: &ProgressSnapshot) -> Result<(), RenderError> {
            self.starts.lock().unwrap().push(snapshot.display_index);
            Ok(())
        }

        fn update(&mut self, _: &ProgressSnapshot) -> Result<(), RenderError> {
            Ok(())
        }

        fn stop(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_batch_request_new() {
        let entry = BatchRequest::new("https://example.com/x", "./out", "x.bin");
        assert_eq!(entry.url, "https://example.com/x");
        assert_eq!(entry.directory, "./out");
        assert_eq!(entry.file_name, "x.bin");
    }

    #[tokio::test]
    async fn test_download_many_empty_batch_returns_no_outcomes() {
        let mut engine = TransferEngine::new();
        let outcomes = engine.download_many(&[]).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_download_many_returns_outcomes_in_input_order() {
        let Some(http) = MockHttp::try_start().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();

        http.serve_bytes("/one.bin", b"one").await;
        http.serve_status("/two.bin", 404).await;
        http.serve_bytes("/three.bin", b"three").await;

        let mut engine = TransferEngine::new();
        let requests = vec![
            BatchRequest::new(http.url("/one.bin"), &dir, "one.bin"),
            BatchRequest::new(http.url("/two.bin"), &dir, "two.bin"),
            BatchRequest::new(http.url("/three.bin"), &dir, "three.bin"),
        ];

        let outcomes = engine.download_many(&requests).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[1].error().unwrap().kind(), ErrorKind::Fetch);
        assert!(outcomes[2].is_success());

        assert_eq!(
            std::fs::read(temp_dir.path().join("one.bin")).unwrap(),
            b"one"
        );
        assert_eq!(
            std::fs::read(temp_dir.path().join("three.bin")).unwrap(),
            b"three"
        );
        assert!(!temp_dir.path().join("two.bin").exists());
    }

    #[tokio::test]
    async fn test_download_many_assigns_one_based_sequence_numbers() {
        let Some(http) = MockHttp::try_start().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();

        http.serve_all(b"payload").await;

        let render = IndexRender::default();
        let mut engine = TransferEngine::builder()
            .render(Box::new(render.clone()))
            .build();
        let requests = vec![
            BatchRequest::new(http.url("/a"), &dir, "a.bin"),
            BatchRequest::new(http.url("/b"), &dir, "b.bin"),
            BatchRequest::new(http.url("/c"), &dir, "c.bin"),
        ];

        let outcomes = engine.download_many(&requests).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(*render.starts.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_download_many_all_failures_still_yields_all_outcomes() {
        let mut engine = TransferEngine::builder().timeout_millis(2000).build();
        let requests = vec![
            BatchRequest::new("http://127.0.0.1:1/a", "", "a.bin"),
            BatchRequest::new("not-a-valid-url", "", "b.bin"),
        ];

        let outcomes = engine.download_many(&requests).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_success()));
    }
}
