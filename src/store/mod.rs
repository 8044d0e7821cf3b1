use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::job::{Job, JobStatus};

/// Terminal bucket a URL moves into once its download resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOutcome {
    Completed,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    JobNotFound(String),
}

/// Keyed job-record storage mutated field-by-field.
///
/// The orchestrator is the sole writer; route handlers only read. Readers may
/// observe any intermediate state of a job, never an inconsistent one.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), StoreError>;

    async fn get(&self, job_id: &str) -> Result<Option<Job>, StoreError>;

    async fn list_ids(&self) -> Result<Vec<String>, StoreError>;

    async fn set_status(&self, job_id: &str, status: JobStatus) -> Result<(), StoreError>;

    async fn set_finished(&self, job_id: &str, finished: DateTime<Utc>) -> Result<(), StoreError>;

    /// Move a URL out of `pending` into its outcome bucket as one atomic
    /// update, so a concurrent `get` never sees it in zero or two lists.
    async fn move_url(&self, job_id: &str, url: &str, outcome: UrlOutcome)
        -> Result<(), StoreError>;
}

/// In-memory job store, the default backend.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn create(&self, job: &Job) -> Result<(), StoreError> {
        self.jobs
            .write()
            .await
            .insert(job.job_id.clone(), job.clone());
        Ok(())
    }

    async fn get(&self, job_id: &str) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.read().await.get(job_id).cloned())
    }

    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.jobs.read().await.keys().cloned().collect())
    }

    async fn set_status(&self, job_id: &str, status: JobStatus) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.to_string()))?;
        job.status = status;
        Ok(())
    }

    async fn set_finished(&self, job_id: &str, finished: DateTime<Utc>) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.to_string()))?;
        job.finished = Some(finished);
        Ok(())
    }

    async fn move_url(
        &self,
        job_id: &str,
        url: &str,
        outcome: UrlOutcome,
    ) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.to_string()))?;
        if let Some(pos) = job.uploaded.pending.iter().position(|u| u == url) {
            job.uploaded.pending.remove(pos);
        }
        match outcome {
            UrlOutcome::Completed => job.uploaded.completed.push(url.to_string()),
            UrlOutcome::Failed => job.uploaded.failed.push(url.to_string()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job::new(
            "job-1".to_string(),
            vec!["http://a/1.png".to_string(), "http://a/2.png".to_string()],
            vec!["bogus".to_string()],
        )
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        store.create(&sample_job()).await.unwrap();

        let job = store.get("job-1").await.unwrap().unwrap();
        assert_eq!(job.job_id, "job-1");
        assert_eq!(job.uploaded.pending.len(), 2);
        assert_eq!(job.uploaded.failed, vec!["bogus"]);
    }

    #[tokio::test]
    async fn get_unknown_job_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_ids_reports_known_jobs() {
        let store = MemoryStore::new();
        store.create(&sample_job()).await.unwrap();

        let ids = store.list_ids().await.unwrap();
        assert_eq!(ids, vec!["job-1"]);
    }

    #[tokio::test]
    async fn move_url_transfers_between_lists() {
        let store = MemoryStore::new();
        store.create(&sample_job()).await.unwrap();

        store
            .move_url("job-1", "http://a/1.png", UrlOutcome::Completed)
            .await
            .unwrap();
        store
            .move_url("job-1", "http://a/2.png", UrlOutcome::Failed)
            .await
            .unwrap();

        let job = store.get("job-1").await.unwrap().unwrap();
        assert!(job.uploaded.pending.is_empty());
        assert_eq!(job.uploaded.completed, vec!["http://a/1.png"]);
        assert_eq!(job.uploaded.failed, vec!["bogus", "http://a/2.png"]);
    }

    #[tokio::test]
    async fn mutations_on_unknown_job_fail() {
        let store = MemoryStore::new();

        let err = store
            .set_status("missing", JobStatus::Complete)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::JobNotFound(id) if id == "missing"));

        assert!(store
            .move_url("missing", "http://a/1.png", UrlOutcome::Failed)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn status_and_finished_updates_stick() {
        let store = MemoryStore::new();
        store.create(&sample_job()).await.unwrap();

        store
            .set_status("job-1", JobStatus::InProgress)
            .await
            .unwrap();
        let now = Utc::now();
        store.set_finished("job-1", now).await.unwrap();
        store.set_status("job-1", JobStatus::Complete).await.unwrap();

        let job = store.get("job-1").await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(job.finished, Some(now));
    }
}
