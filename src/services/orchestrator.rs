use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;

use crate::models::job::{Job, JobStatus};
use crate::services::classifier;
use crate::services::download::ImageDownloader;
use crate::services::upload::ImageUploader;
use crate::store::{JobStore, StoreError, UrlOutcome};

/// Drives each submitted URL through download then upload, recording per-URL
/// outcome and the job's lifecycle status through the store.
///
/// Each URL is owned by exactly one task, so concurrent tasks never contend
/// for the same element of the job's URL sets. Every pending URL gets its own
/// task at once; there is no concurrency cap.
#[derive(Clone)]
pub struct JobOrchestrator {
    store: Arc<dyn JobStore>,
    downloader: Arc<dyn ImageDownloader>,
    uploader: Arc<dyn ImageUploader>,
}

impl JobOrchestrator {
    pub fn new(
        store: Arc<dyn JobStore>,
        downloader: Arc<dyn ImageDownloader>,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        Self {
            store,
            downloader,
            uploader,
        }
    }

    /// Classify the submission, persist the initial record, and schedule
    /// background processing. Returns once the record is pollable; never
    /// blocks on network I/O. Uniqueness of `job_id` is the caller's problem.
    pub async fn submit(&self, job_id: String, urls: Vec<String>) -> Result<String, StoreError> {
        let (valid, invalid) = classifier::partition(urls);
        let job = Job::new(job_id.clone(), valid, invalid);
        self.store.create(&job).await?;

        metrics::counter!("upload_jobs_total").increment(1);
        tracing::info!(
            job_id = %job.job_id,
            pending = job.uploaded.pending.len(),
            invalid = job.uploaded.failed.len(),
            "Job submitted"
        );

        let orchestrator = self.clone();
        tokio::spawn(async move { orchestrator.process(job).await });

        Ok(job_id)
    }

    /// Background half of a job: download fan-out, upload fan-out, terminal
    /// status flip. Always reaches `complete`, however many URLs fail; store
    /// errors are logged rather than propagated.
    async fn process(&self, job: Job) {
        let start = Instant::now();
        let job_id = job.job_id.as_str();

        if let Err(e) = self.store.set_status(job_id, JobStatus::InProgress).await {
            tracing::error!(job_id, error = %e, "Failed to mark job in-progress");
        }

        // Full barrier: no upload starts before every download has resolved.
        let downloads = job
            .uploaded
            .pending
            .iter()
            .map(|url| self.handle_download(job_id, url));
        let payloads = join_all(downloads).await;

        let uploads = payloads
            .into_iter()
            .map(|payload| self.handle_upload(job_id, payload));
        let references = join_all(uploads).await;
        let uploaded = references.iter().filter(|r| r.is_ok()).count();

        if let Err(e) = self.store.set_finished(job_id, Utc::now()).await {
            tracing::error!(job_id, error = %e, "Failed to record finish time");
        }
        if let Err(e) = self.store.set_status(job_id, JobStatus::Complete).await {
            tracing::error!(job_id, error = %e, "Failed to mark job complete");
        }

        metrics::counter!("upload_jobs_completed").increment(1);
        metrics::histogram!("job_processing_seconds").record(start.elapsed().as_secs_f64());
        tracing::info!(
            job_id,
            uploaded,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Job complete"
        );
    }

    /// Download one URL, moving it to `completed` or `failed` in one atomic
    /// store update. A failure here never aborts sibling tasks.
    async fn handle_download(&self, job_id: &str, url: &str) -> Result<Vec<u8>, String> {
        match self.downloader.download(url).await {
            Ok(image) => {
                if let Err(e) = self.store.move_url(job_id, url, UrlOutcome::Completed).await {
                    tracing::error!(job_id, url, error = %e, "Failed to record download success");
                }
                tracing::info!(job_id, url, bytes = image.len(), "Download succeeded");
                Ok(image)
            }
            Err(e) => {
                metrics::counter!("image_download_failures_total").increment(1);
                if let Err(store_err) = self.store.move_url(job_id, url, UrlOutcome::Failed).await {
                    tracing::error!(job_id, url, error = %store_err, "Failed to record download failure");
                }
                tracing::info!(job_id, url, error = %e, "Download failed");
                Err(e.to_string())
            }
        }
    }

    /// Upload one downloaded payload. An already-failed download passes
    /// through untouched; upload failures are logged and absorbed, never
    /// written back to the job record.
    async fn handle_upload(
        &self,
        job_id: &str,
        payload: Result<Vec<u8>, String>,
    ) -> Result<String, String> {
        let image = payload?;
        match self.uploader.upload(&image).await {
            Ok(reference) => {
                tracing::debug!(job_id, reference = %reference, "Upload succeeded");
                Ok(reference)
            }
            Err(e) => {
                tracing::warn!(job_id, error = %e, "Upload failed");
                Err(e.to_string())
            }
        }
    }
}
