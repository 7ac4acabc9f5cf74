/// Fjall-based persistence layer for job records
///
/// This module provides durable storage for the asynchronous scrape jobs'
/// state. It uses Fjall (an embedded LSM key-value store) to persist one
/// record per job id: the lifecycle status plus, on success, the extracted
/// product records.
///
/// ## Architecture
///
/// The keyspace is opened once at process start and shared through
/// `AppState`. The request handler writes the pending record; the job
/// runner performs the single terminal write. Each write is one atomic
/// insert keyed by job id; exactly one runner invocation owns each job id,
/// so no read-modify-write cycle exists.
///
/// ## Usage
///
/// ```rust,ignore
/// use shelfscan::ledger::{JobLedger, JobOutcome, JobStore};
///
/// let ledger = JobLedger::open("data/ledger")?;
/// ledger.record_pending("job_123")?;
/// ledger.record_outcome("job_123", JobOutcome::Failed)?;
/// let record = ledger.get("job_123")?;
/// ```
pub mod error;
pub mod partitions;
pub mod store;

pub use error::{LedgerError, Result};
pub use store::{JobLedger, JobOutcome, JobStore};
