//! API models for the shelfscan scrape and job-status endpoints.
//!
//! This module defines the core data structures of the external contract:
//! - `GET /scrape` returns an ordered array of [`ProductRecord`] (sync mode)
//!   or a plain-text acceptance (async mode, selected by the `jobId` query
//!   parameter)
//! - `GET /jobs/{job_id}` returns a [`JobRecord`] for job tracking
//!
//! # Key Concepts
//!
//! - **Job**: one asynchronous scrape request, identified by a
//!   caller-supplied `jobId`
//! - **ProductRecord**: one product extracted from the rendered listing page
//! - **Store-scoping cookie**: sent to the fetch provider so the rendered
//!   page reflects a specific physical store's inventory and pricing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product extracted from a store listing page.
///
/// Invariant: `name` and `price` are non-empty; candidates missing either
/// are dropped during extraction. `size` falls back to `"N/A"` and
/// `availability` is always `"In Stock"` (the listing only shows stocked
/// items for the scoped store).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub price: String,
    pub size: String,
    pub availability: String,
}

/// Query parameters accepted by `GET /scrape`.
///
/// `store` must be a purely numeric store id. The presence of `jobId`
/// selects asynchronous mode.
#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub store: Option<String>,
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

/// Persisted state of one asynchronous scrape job.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobRecord {
    pub job_id: String,
    pub status: JobStatus,
    /// Present only when the job completed with at least one record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ProductRecord>>,
    pub updated_at: DateTime<Utc>,
}

/// Job lifecycle: pending until the runner's single terminal write, then
/// complete or failed forever.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Complete,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: std::collections::HashMap<String, String>,
    pub version: String,
}
