use std::path::Path;

use chrono::Utc;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::{debug, info};

use crate::api::models::{JobRecord, JobStatus, ProductRecord};

use super::error::Result;
use super::partitions::encode_job_key;

/// Terminal result of one job run.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    Complete(Vec<ProductRecord>),
    Failed,
}

/// Status store keyed by job id.
///
/// Every write replaces the whole record in a single atomic insert;
/// results are stored only on success, and `updated_at` is stamped at
/// write time.
pub trait JobStore: Send + Sync {
    /// Record a job as accepted but not yet finished.
    fn record_pending(&self, job_id: &str) -> Result<()>;

    /// Record the terminal status (plus results on success) for a job.
    fn record_outcome(&self, job_id: &str, outcome: JobOutcome) -> Result<()>;

    /// Fetch the current record for a job id.
    fn get(&self, job_id: &str) -> Result<Option<JobRecord>>;
}

/// Fjall-backed persistent job store
#[derive(Clone)]
pub struct JobLedger {
    keyspace: Keyspace,
    jobs: PartitionHandle,
}

impl JobLedger {
    /// Open or create a ledger at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening job ledger at: {}", path.display());

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;
        let jobs = keyspace.open_partition("jobs", PartitionCreateOptions::default())?;

        info!("Job ledger opened successfully");
        Ok(Self { keyspace, jobs })
    }

    fn put(&self, record: &JobRecord) -> Result<()> {
        let key = encode_job_key(&record.job_id);
        let value = serde_json::to_vec(record)?;
        self.jobs.insert(key, value)?;
        Ok(())
    }

    /// Persist all pending writes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }
}

impl JobStore for JobLedger {
    fn record_pending(&self, job_id: &str) -> Result<()> {
        self.put(&JobRecord {
            job_id: job_id.to_string(),
            status: JobStatus::Pending,
            results: None,
            updated_at: Utc::now(),
        })?;
        debug!("Recorded pending job: {}", job_id);
        Ok(())
    }

    fn record_outcome(&self, job_id: &str, outcome: JobOutcome) -> Result<()> {
        let (status, results) = match outcome {
            JobOutcome::Complete(items) => (JobStatus::Complete, Some(items)),
            JobOutcome::Failed => (JobStatus::Failed, None),
        };
        self.put(&JobRecord {
            job_id: job_id.to_string(),
            status,
            results,
            updated_at: Utc::now(),
        })?;
        debug!("Recorded outcome for job: {}", job_id);
        Ok(())
    }

    fn get(&self, job_id: &str) -> Result<Option<JobRecord>> {
        let key = encode_job_key(job_id);
        match self.jobs.get(key)? {
            Some(value) => {
                let record = serde_json::from_slice(&value)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
