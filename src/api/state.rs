use std::sync::Arc;

use crate::config::Config;
use crate::extract::ProductExtractor;
use crate::fetch::PageFetcher;
use crate::ledger::JobStore;
use crate::observability::Metrics;
use crate::worker::JobRunner;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub extractor: Arc<dyn ProductExtractor>,
    pub ledger: Arc<dyn JobStore>,
    pub runner: Arc<JobRunner>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn ProductExtractor>,
        ledger: Arc<dyn JobStore>,
    ) -> Self {
        let config = Arc::new(config);
        let metrics = Arc::new(Metrics::new());
        let runner = Arc::new(JobRunner::new(
            fetcher.clone(),
            extractor.clone(),
            ledger.clone(),
            metrics.clone(),
            config.extractor.max_items,
        ));

        Self {
            config,
            fetcher,
            extractor,
            ledger,
            runner,
            metrics,
        }
    }
}
