use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch upload job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Queued,
    InProgress,
    Complete,
}

/// Disposition of every URL accepted into a job.
///
/// The three lists are disjoint at rest: a URL starts in `pending` and moves
/// into exactly one of `completed` or `failed` when its download resolves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlSet {
    pub pending: Vec<String>,
    pub completed: Vec<String>,
    pub failed: Vec<String>,
}

/// A batch upload job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub uploaded: UrlSet,
    pub status: JobStatus,
    pub finished: Option<DateTime<Utc>>,
}

impl Job {
    /// Initial record for a submission: syntactically valid URLs start
    /// pending, invalid ones are failed from the outset.
    pub fn new(job_id: String, valid: Vec<String>, invalid: Vec<String>) -> Self {
        Self {
            job_id,
            uploaded: UrlSet {
                pending: valid,
                completed: Vec::new(),
                failed: invalid,
            },
            status: JobStatus::Queued,
            finished: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&JobStatus::Queued).unwrap(), "\"queued\"");
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&JobStatus::Complete).unwrap(),
            "\"complete\""
        );
    }

    #[test]
    fn new_job_partitions_submission() {
        let job = Job::new(
            "abc".to_string(),
            vec!["http://a/1.png".to_string()],
            vec!["not-a-url".to_string()],
        );
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.uploaded.pending, vec!["http://a/1.png"]);
        assert_eq!(job.uploaded.failed, vec!["not-a-url"]);
        assert!(job.uploaded.completed.is_empty());
        assert!(job.finished.is_none());
    }

    #[test]
    fn wire_shape_matches_contract() {
        let job = Job::new("abc".to_string(), vec![], vec![]);
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["job_id"], "abc");
        assert_eq!(value["status"], "queued");
        assert!(value["finished"].is_null());
        assert!(value["uploaded"]["pending"].is_array());
        assert!(value["uploaded"]["completed"].is_array());
        assert!(value["uploaded"]["failed"].is_array());
    }
}
