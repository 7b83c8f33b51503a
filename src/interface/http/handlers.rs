use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::domain::{Disk, DiskSpaceAlert, LocalState};
use crate::ports::StateReader;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub reader: StateReader,
}

#[derive(Debug, Serialize)]
pub struct DiskResponse {
    pub path: String,
    pub free: u64,
    pub total: u64,
    /// Absent for a zero-capacity disk
    pub percent_free: Option<f64>,
}

impl From<&Disk> for DiskResponse {
    fn from(disk: &Disk) -> Self {
        Self {
            path: disk.path.clone(),
            free: disk.free,
            total: disk.total,
            percent_free: (disk.total > 0).then(|| disk.percent_free()),
        }
    }
}

/// Response for /api/state
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub timestamp: String,
    pub version: String,
    pub uptime_ms: u64,
    pub storage_space_alert: DiskSpaceAlert,
    pub disks: Vec<DiskResponse>,
}

impl From<&LocalState> for StateResponse {
    fn from(state: &LocalState) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: state.version.clone(),
            uptime_ms: state.uptime.as_millis() as u64,
            storage_space_alert: state.storage_space_alert,
            disks: state.disks.iter().map(DiskResponse::from).collect(),
        }
    }
}

/// Response for /api/disks
#[derive(Debug, Serialize)]
pub struct DisksResponse {
    pub timestamp: String,
    pub disks: Vec<DiskResponse>,
}

/// Handler for GET /api/health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "spacemon"
        })),
    )
}

/// Handler for GET /api/state
pub async fn state_handler(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.reader.latest();
    Json(StateResponse::from(snapshot.as_ref()))
}

/// Handler for GET /api/disks
pub async fn disks_handler(State(state): State<AppState>) -> Json<DisksResponse> {
    let snapshot = state.reader.latest();
    Json(DisksResponse {
        timestamp: chrono::Utc::now().to_rfc3339(),
        disks: snapshot.disks.iter().map(DiskResponse::from).collect(),
    })
}
