use backend_client::{BackendError, InventoryBackend};
use serde::Serialize;
use shared::{
    domain::{Asset, ScheduledScan},
    protocol::{ASSETS_PATH, SCHEDULED_SCANS_PATH},
};
use tracing::{error, warn};

#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub backend_url: String,
    pub assets: Vec<Asset>,
    pub scheduled_scans: Vec<ScheduledScan>,
    pub asset_count: usize,
    pub scheduled_scan_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerView {
    pub backend_url: String,
}

/// Assets are required for the index page; any failure is returned.
pub async fn fetch_assets(backend: &dyn InventoryBackend) -> Result<Vec<Asset>, BackendError> {
    backend.list_assets().await.map_err(|err| {
        error!(endpoint = ASSETS_PATH, error = %err, "asset fetch failed");
        err
    })
}

/// Scheduled scans are optional; failures degrade to an empty list.
pub async fn fetch_scheduled_scans(backend: &dyn InventoryBackend) -> Vec<ScheduledScan> {
    match backend.list_scheduled_scans().await {
        Ok(scans) => scans,
        Err(err) => {
            warn!(
                endpoint = SCHEDULED_SCANS_PATH,
                error = %err,
                "scheduled scans unavailable; rendering without them"
            );
            Vec::new()
        }
    }
}

pub async fn build_index_view(
    backend: &dyn InventoryBackend,
    backend_url: &str,
) -> Result<IndexView, BackendError> {
    let (assets, scheduled_scans) =
        tokio::join!(fetch_assets(backend), fetch_scheduled_scans(backend));
    let assets = assets?;

    Ok(IndexView {
        backend_url: backend_url.to_string(),
        asset_count: assets.len(),
        scheduled_scan_count: scheduled_scans.len(),
        assets,
        scheduled_scans,
    })
}

pub fn build_scheduler_view(backend_url: &str) -> SchedulerView {
    SchedulerView {
        backend_url: backend_url.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
