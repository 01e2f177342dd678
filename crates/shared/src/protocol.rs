use serde::{Deserialize, Serialize};

use crate::domain::{Asset, ScheduledScan};

pub const ASSETS_PATH: &str = "/tenable/assets";
pub const SCHEDULED_SCANS_PATH: &str = "/tenable/scheduled-scans";

/// Body of `GET /tenable/assets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsResponse {
    pub assets: Vec<Asset>,
}

/// Body of `GET /tenable/scheduled-scans`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduledScansResponse {
    pub scans: Vec<ScheduledScan>,
}
