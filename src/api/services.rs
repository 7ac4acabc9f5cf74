use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::{models::ScrapeParams, state::AppState, validation};
use crate::api::error::ApiError;
use crate::fetch::{FetchError, FetchMode};
use crate::worker;

/// Store listing scrape endpoint (GET /scrape)
///
/// Two modes share this route:
/// - **Sync** (`?store=1234`): fetch and extract inline, bounded by the
///   interactive fetch timeout, and return the records in the response.
/// - **Async** (`?store=1234&jobId=abc`): selected by the presence of
///   `jobId`. Validates input, records the job as pending, dispatches the
///   fetch/extract work detached from this request, and acknowledges with
///   202 immediately. The eventual outcome lands in the job ledger.
pub async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Result<Response, ApiError> {
    match params.job_id {
        Some(job_id) => scrape_background(state, params.store, job_id).await,
        None => scrape_inline(state, params.store).await,
    }
}

/// Sync mode: FetchClient → Extractor within the request lifecycle.
///
/// Check order matches the contract: provider key first (500), then store
/// id (400), so a misconfigured server is reported even for bad input.
async fn scrape_inline(state: AppState, store: Option<String>) -> Result<Response, ApiError> {
    if state.config.fetch.api_key.is_none() {
        return Err(ApiError::ApiKeyMissing);
    }

    let store = store
        .filter(|value| validation::is_valid_store_id(value))
        .ok_or(ApiError::InvalidStoreId)?;

    let markup = state
        .fetcher
        .fetch_listing(&store, FetchMode::Interactive)
        .await
        .map_err(|err| {
            warn!(%store, error = %err, "listing fetch failed");
            match err {
                FetchError::MissingApiKey => ApiError::ApiKeyMissing,
                _ => ApiError::UpstreamFailed,
            }
        })?;

    let items = state
        .extractor
        .extract(&markup, state.config.extractor.max_items);

    if items.is_empty() {
        warn!(%store, "no items extracted; the page layout may have changed");
        return Err(ApiError::ParseFailed);
    }

    Ok((StatusCode::OK, Json(items)).into_response())
}

/// Async mode: validate, record pending, dispatch, acknowledge.
///
/// The acknowledgement is sent without awaiting the dispatched job; callers
/// poll `GET /jobs/{job_id}` for the terminal status.
async fn scrape_background(
    state: AppState,
    store: Option<String>,
    job_id: String,
) -> Result<Response, ApiError> {
    if job_id.is_empty() {
        return Err(ApiError::MissingJobParams);
    }
    let store = store.ok_or(ApiError::MissingJobParams)?;
    if !validation::is_valid_store_id(&store) {
        return Err(ApiError::InvalidStoreId);
    }

    // Pending is written before dispatch so an immediate poll can tell
    // "accepted, not finished" apart from an unknown jobId.
    if let Err(err) = state.ledger.record_pending(&job_id) {
        error!(%job_id, error = %err, "failed to record pending job");
        return Err(ApiError::Internal);
    }

    state.metrics.job_accepted();

    // Detached from this request; the supervisor task watches the handle.
    let _detached = worker::dispatch(state.runner.clone(), job_id.clone(), store);

    Ok((
        StatusCode::ACCEPTED,
        format!("accepted: job {job_id} queued\n"),
    )
        .into_response())
}

/// Job status endpoint (GET /jobs/{job_id})
///
/// Returns the current JobRecord for a given job_id: pending until the
/// runner's terminal write, then complete (with results) or failed.
/// 404 means the jobId was never accepted.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .ledger
        .get(&job_id)
        .map_err(|err| {
            error!(%job_id, error = %err, "ledger read failed");
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound(format!("job {job_id}")))?;

    Ok((StatusCode::OK, Json(record)))
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert(
        "ledger".to_string(),
        match state.ledger.get("__health_probe__") {
            Ok(_) => "healthy".to_string(),
            Err(_) => "unhealthy".to_string(),
        },
    );

    let all_healthy = components.values().all(|status| status == "healthy");
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = super::models::HealthResponse {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response))
}
