//! Background job execution
//!
//! One detached task per accepted job: fetch the rendered listing, extract
//! records, write the single terminal status. Dispatch is supervised: the
//! job task's handle is watched by a second task so a panic in the detached
//! path still reaches the log instead of vanishing.

pub mod runner;

pub use runner::JobRunner;

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::error;

/// Launch a job detached from the request/response cycle.
///
/// The returned handle belongs to the supervisor; awaiting it waits for the
/// job and its bookkeeping to finish. Callers wanting fire-and-forget
/// semantics drop it; the tasks keep running either way.
pub fn dispatch(runner: Arc<JobRunner>, job_id: String, store_id: String) -> JoinHandle<()> {
    let supervised_id = job_id.clone();
    let work = tokio::spawn(async move { runner.run(&job_id, &store_id).await });

    tokio::spawn(async move {
        if let Err(err) = work.await {
            error!(job_id = %supervised_id, error = %err, "background job task aborted");
        }
    })
}
