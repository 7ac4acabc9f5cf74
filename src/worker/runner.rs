//! Job runner - drives one scrape job to its terminal status

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::extract::ProductExtractor;
use crate::fetch::{FetchMode, PageFetcher};
use crate::ledger::{JobOutcome, JobStore};
use crate::observability::Metrics;

/// Executes one job: fetch → extract → one terminal ledger write.
pub struct JobRunner {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn ProductExtractor>,
    ledger: Arc<dyn JobStore>,
    metrics: Arc<Metrics>,
    max_items: usize,
}

impl JobRunner {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn ProductExtractor>,
        ledger: Arc<dyn JobStore>,
        metrics: Arc<Metrics>,
        max_items: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            ledger,
            metrics,
            max_items,
        }
    }

    /// Run the job to its terminal status.
    ///
    /// A fetch error, an upstream HTTP error, and an empty extraction all
    /// collapse to `failed`: zero records most often signals an upstream
    /// layout change, not an empty shelf. The ledger receives exactly one
    /// write from this method regardless of outcome; a write failure is
    /// logged and swallowed, since no response channel remains open to
    /// report it to the original caller.
    pub async fn run(&self, job_id: &str, store_id: &str) {
        info!(%job_id, %store_id, "Starting background scrape job");

        let outcome = match self
            .fetcher
            .fetch_listing(store_id, FetchMode::Background)
            .await
        {
            Err(err) => {
                warn!(%job_id, %store_id, error = %err, "listing fetch failed");
                JobOutcome::Failed
            }
            Ok(markup) => {
                let items = self.extractor.extract(&markup, self.max_items);
                if items.is_empty() {
                    warn!(%job_id, %store_id, "no items extracted; the page layout may have changed");
                    JobOutcome::Failed
                } else {
                    info!(%job_id, count = items.len(), "Extraction complete");
                    JobOutcome::Complete(items)
                }
            }
        };

        match &outcome {
            JobOutcome::Complete(_) => self.metrics.job_completed(),
            JobOutcome::Failed => self.metrics.job_failed(),
        }

        if let Err(err) = self.ledger.record_outcome(job_id, outcome) {
            error!(%job_id, error = %err, "failed to record job outcome");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{JobRecord, JobStatus};
    use crate::extract::ListingExtractor;
    use crate::fetch::FetchError;
    use crate::ledger::Result as LedgerResult;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory JobStore counting terminal writes per job id.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, JobRecord>>,
        outcome_writes: Mutex<HashMap<String, usize>>,
    }

    impl JobStore for MemoryStore {
        fn record_pending(&self, job_id: &str) -> LedgerResult<()> {
            self.records.lock().unwrap().insert(
                job_id.to_string(),
                JobRecord {
                    job_id: job_id.to_string(),
                    status: JobStatus::Pending,
                    results: None,
                    updated_at: Utc::now(),
                },
            );
            Ok(())
        }

        fn record_outcome(&self, job_id: &str, outcome: JobOutcome) -> LedgerResult<()> {
            *self
                .outcome_writes
                .lock()
                .unwrap()
                .entry(job_id.to_string())
                .or_insert(0) += 1;
            let (status, results) = match outcome {
                JobOutcome::Complete(items) => (JobStatus::Complete, Some(items)),
                JobOutcome::Failed => (JobStatus::Failed, None),
            };
            self.records.lock().unwrap().insert(
                job_id.to_string(),
                JobRecord {
                    job_id: job_id.to_string(),
                    status,
                    results,
                    updated_at: Utc::now(),
                },
            );
            Ok(())
        }

        fn get(&self, job_id: &str) -> LedgerResult<Option<JobRecord>> {
            Ok(self.records.lock().unwrap().get(job_id).cloned())
        }
    }

    /// Stub fetcher returning a fixed result.
    struct StubFetcher {
        result: std::result::Result<String, ()>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_listing(
            &self,
            _store_id: &str,
            _mode: FetchMode,
        ) -> std::result::Result<String, FetchError> {
            match &self.result {
                Ok(markup) => Ok(markup.clone()),
                Err(()) => Err(FetchError::Timeout),
            }
        }
    }

    fn listing_markup(names: &[&str]) -> String {
        let items: Vec<String> = names
            .iter()
            .map(|name| {
                format!(
                    r#"<div data-item-id="x">
                         <span data-automation-id="product-title">{name}</span>
                         <div data-automation-id="product-price"><span class="f2">$1.00</span></div>
                       </div>"#
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", items.join("\n"))
    }

    fn build_runner(
        fetch_result: std::result::Result<String, ()>,
    ) -> (JobRunner, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let runner = JobRunner::new(
            Arc::new(StubFetcher {
                result: fetch_result,
            }),
            Arc::new(ListingExtractor::new()),
            store.clone(),
            Arc::new(Metrics::new()),
            15,
        );
        (runner, store)
    }

    #[tokio::test]
    async fn test_fetch_failure_records_failed() {
        let (runner, store) = build_runner(Err(()));

        runner.run("job_1", "1234").await;

        let record = store.get("job_1").unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Failed);
        assert!(record.results.is_none());
        assert_eq!(store.outcome_writes.lock().unwrap()["job_1"], 1);
    }

    #[tokio::test]
    async fn test_empty_extraction_records_failed() {
        let (runner, store) = build_runner(Ok("<html><body></body></html>".to_string()));

        runner.run("job_2", "1234").await;

        let record = store.get("job_2").unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Failed);
        assert!(record.results.is_none());
    }

    #[tokio::test]
    async fn test_successful_run_records_complete_in_order() {
        let (runner, store) = build_runner(Ok(listing_markup(&["First", "Second", "Third"])));

        runner.run("job_3", "1234").await;

        let record = store.get("job_3").unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Complete);
        let results = record.results.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "First");
        assert_eq!(results[2].name, "Third");
        assert_eq!(store.outcome_writes.lock().unwrap()["job_3"], 1);
    }
}
